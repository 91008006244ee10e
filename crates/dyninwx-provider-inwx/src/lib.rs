//! # dyninwx-provider-inwx
//!
//! INWX DNS provider for the dyninwx updater: builds XML-RPC request
//! bodies, posts them to the provider endpoint, and decodes the response
//! envelopes and record lists.
//!
//! The provider is stateless and single-shot: one API call per method
//! invocation, full error propagation, no retry or backoff of its own.

pub mod xmlrpc;

pub use xmlrpc::{Envelope, RequestBuilder, XmlRpcMethod, parse_envelope, parse_record_list};

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use dyninwx_core::config::Settings;
use dyninwx_core::error::{Error, Result};
use dyninwx_core::types::{Credentials, NameServerRecord, RecordId};

/// Production API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.domrobot.com/xmlrpc";

/// The default API endpoint as a parsed URL
pub fn default_endpoint() -> Url {
    Url::parse(DEFAULT_API_ENDPOINT).expect("default endpoint constant must parse")
}

/// Immutable connection configuration for [`InwxProvider`]
#[derive(Debug, Clone)]
pub struct InwxProviderConfig {
    /// XML-RPC endpoint to post to
    pub endpoint: Url,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl InwxProviderConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            connect_timeout: dyninwx_core::config::settings::DEFAULT_CONNECT_TIMEOUT,
            request_timeout: dyninwx_core::config::settings::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Connection configuration from projected settings, falling back to
    /// the production endpoint when none is configured.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings
                .api_endpoint
                .clone()
                .unwrap_or_else(default_endpoint),
            connect_timeout: settings.connect_timeout,
            request_timeout: settings.request_timeout,
        }
    }
}

/// INWX XML-RPC API client
pub struct InwxProvider {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Credentials,
}

impl fmt::Debug for InwxProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InwxProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.credentials.username)
            .field("password", &self.credentials.password)
            .finish()
    }
}

impl InwxProvider {
    /// Create a provider from an immutable configuration and credentials.
    pub fn new(config: InwxProviderConfig, credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::http(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            credentials,
        })
    }

    /// Point one resource record at a new address.
    ///
    /// Returns the API's status envelope; a non-success envelope is not an
    /// `Err`, callers decide how to react to provider-side rejections.
    pub async fn update_record(
        &self,
        record_id: RecordId,
        address: IpAddr,
        ttl: Duration,
    ) -> Result<Envelope> {
        tracing::debug!(%record_id, %address, ttl_seconds = ttl.as_secs(), "updating record");

        let body = RequestBuilder::new(XmlRpcMethod::UpdateRecord)
            .credentials(&self.credentials)
            .parameter("id", "long", record_id)
            .parameter("content", "string", address)
            .parameter("ttl", "int", ttl.as_secs())
            .build();

        let response = self.post(body).await?;
        parse_envelope(&response)
    }

    /// List the nameserver records of a domain (`*` lists every domain).
    pub async fn list_records(
        &self,
        domain: &str,
    ) -> Result<(Envelope, Vec<NameServerRecord>)> {
        tracing::debug!(domain, "listing nameserver records");

        let body = RequestBuilder::new(XmlRpcMethod::Info)
            .credentials(&self.credentials)
            .parameter("domain", "string", domain)
            .build();

        let response = self.post(body).await?;
        parse_record_list(&response)
    }

    async fn post(&self, body: String) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/xml")
            .header(ACCEPT, "application/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("request to [{}] failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!(
                "API endpoint [{}] answered with status {status}",
                self.endpoint
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::http(format!("cannot read API response body: {e}")))
    }
}
