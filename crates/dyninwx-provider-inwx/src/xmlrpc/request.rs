//! XML-RPC `methodCall` request bodies.
//!
//! Requests are produced from a static template: every call carries the
//! credential members `user`, `lang` and `pass`, followed by the caller's
//! parameters in insertion order. Values are inserted verbatim; the
//! parameters this crate sends (record ids, IP addresses, integer TTLs,
//! domain names) never carry XML metacharacters.

use std::fmt;

use dyninwx_core::types::Credentials;

const XML_POST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodCall>
   <methodName>%METHOD%</methodName>
   <params>
      <param>
         <value>
            <struct>
               <member>
                  <name>user</name>
                  <value>
                     <string>%USER%</string>
                  </value>
               </member>
               <member>
                  <name>lang</name>
                  <value>
                     <string>en</string>
                  </value>
               </member>
               <member>
                  <name>pass</name>
                  <value>
                     <string>%PASSWD%</string>
                  </value>
               </member>
               %PARAMETER%
            </struct>
         </value>
      </param>
   </params>
</methodCall>
"#;

/// API methods this crate can call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlRpcMethod {
    /// `nameserver.updateRecord`
    UpdateRecord,
    /// `nameserver.info`
    Info,
    /// `nameserver.exportrecords`
    ExportRecords,
}

impl XmlRpcMethod {
    /// Method name as the API expects it
    pub fn wire_name(self) -> &'static str {
        match self {
            XmlRpcMethod::UpdateRecord => "nameserver.updateRecord",
            XmlRpcMethod::Info => "nameserver.info",
            XmlRpcMethod::ExportRecords => "nameserver.exportrecords",
        }
    }
}

/// Consuming builder for one request body.
///
/// Pure string construction, total over any input; there are no error
/// paths.
#[derive(Debug)]
pub struct RequestBuilder {
    current: String,
}

impl RequestBuilder {
    pub fn new(method: XmlRpcMethod) -> Self {
        Self {
            current: XML_POST_TEMPLATE.replace("%METHOD%", method.wire_name()),
        }
    }

    /// Fill in the credential members.
    pub fn credentials(mut self, credentials: &Credentials) -> Self {
        self.current = self
            .current
            .replace("%USER%", &credentials.username)
            .replace("%PASSWD%", credentials.password.reveal());
        self
    }

    /// Append one `(name, type, value)` struct member.
    ///
    /// `value_type` is the XML-RPC primitive tag (`string`, `int`,
    /// `long`, ...).
    pub fn parameter(mut self, name: &str, value_type: &str, value: impl fmt::Display) -> Self {
        let member = format!(
            "<member>\n   <name>{name}</name>\n   <value>\n      \
             <{value_type}>{value}</{value_type}>\n   </value>\n</member>\n%PARAMETER%\n"
        );
        self.current = self.current.replace("%PARAMETER%\n", &member);
        self
    }

    /// Finish the document, removing the parameter placeholder.
    pub fn build(self) -> String {
        self.current.replace("%PARAMETER%", "")
    }
}
