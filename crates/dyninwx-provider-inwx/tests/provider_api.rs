//! End-to-end provider tests against a stubbed XML-RPC endpoint.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dyninwx_core::error::Error;
use dyninwx_core::types::{Credentials, Password, RecordId, RecordType};
use dyninwx_provider_inwx::{InwxProvider, InwxProviderConfig};

const UPDATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
   <params>
      <param>
         <value>
            <struct>
               <member><name>code</name><value><int>1000</int></value></member>
               <member><name>msg</name><value><string>Command completed successfully</string></value></member>
               <member><name>runtime</name><value><double>0.031</double></value></member>
            </struct>
         </value>
      </param>
   </params>
</methodResponse>
"#;

const LIST_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
   <params>
      <param>
         <value>
            <struct>
               <member><name>code</name><value><int>1000</int></value></member>
               <member><name>msg</name><value><string>Command completed successfully</string></value></member>
               <member><name>resData</name><value><struct>
                  <member><name>record</name><value><array><data>
                     <value><struct>
                        <member><name>id</name><value><int>411</int></value></member>
                        <member><name>name</name><value><string>home.example.org</string></value></member>
                        <member><name>type</name><value><string>A</string></value></member>
                        <member><name>content</name><value><string>192.0.2.10</string></value></member>
                        <member><name>ttl</name><value><int>300</int></value></member>
                        <member><name>prio</name><value><int>0</int></value></member>
                     </struct></value>
                  </data></array></value></member>
               </struct></value></member>
               <member><name>runtime</name><value><double>0.25</double></value></member>
            </struct>
         </value>
      </param>
   </params>
</methodResponse>
"#;

fn provider_for(server: &MockServer) -> InwxProvider {
    let endpoint = Url::parse(&server.uri()).unwrap();
    InwxProvider::new(
        InwxProviderConfig {
            endpoint,
            connect_timeout: Duration::from_millis(500),
            request_timeout: Duration::from_millis(1500),
        },
        Credentials {
            username: "updater".to_string(),
            password: Password::new("s3cret"),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn update_record_posts_xml_and_parses_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/xml"))
        .and(body_string_contains("nameserver.updateRecord"))
        .and(body_string_contains("<string>203.0.113.9</string>"))
        .and(body_string_contains("<int>300</int>"))
        .and(body_string_contains("<string>updater</string>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATE_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let envelope = provider
        .update_record(
            RecordId(42),
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)),
            Duration::from_secs(300),
        )
        .await
        .unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.message, "Command completed successfully");
}

#[tokio::test]
async fn list_records_parses_the_record_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("nameserver.info"))
        .and(body_string_contains("<name>domain</name>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_RESPONSE))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let (envelope, records) = provider.list_records("example.org").await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, RecordId(411));
    assert_eq!(records[0].record_type, RecordType::A);
    assert_eq!(records[0].name, "home.example.org");
}

#[tokio::test]
async fn http_error_status_fails_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .update_record(
            RecordId(42),
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9)),
            Duration::from_secs(300),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn garbage_response_body_is_a_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not xml at all <"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.list_records("*").await.unwrap_err();

    assert!(matches!(err, Error::ParseFailure { .. }));
}
