//! Shared value types: record identifiers, record types, nameserver
//! records, and credentials.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Provider-assigned identifier of a single DNS resource record.
///
/// The value is opaque to this crate; it is only ever compared and echoed
/// back to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// True for the id 0 the API uses for malformed/absent records
    pub fn is_sentinel(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// DNS record types the provider API can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Afsdb,
    Alias,
    Caa,
    Cert,
    Cname,
    Hinfo,
    Key,
    Loc,
    Mx,
    Naptr,
    Ns,
    Openpgpkey,
    Ptr,
    Rp,
    Soa,
    Srv,
    Sshfp,
    Tlsa,
    Txt,
    Uri,
}

impl RecordType {
    /// Wire name as it appears in API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Afsdb => "AFSDB",
            RecordType::Alias => "ALIAS",
            RecordType::Caa => "CAA",
            RecordType::Cert => "CERT",
            RecordType::Cname => "CNAME",
            RecordType::Hinfo => "HINFO",
            RecordType::Key => "KEY",
            RecordType::Loc => "LOC",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ns => "NS",
            RecordType::Openpgpkey => "OPENPGPKEY",
            RecordType::Ptr => "PTR",
            RecordType::Rp => "RP",
            RecordType::Soa => "SOA",
            RecordType::Srv => "SRV",
            RecordType::Sshfp => "SSHFP",
            RecordType::Tlsa => "TLSA",
            RecordType::Txt => "TXT",
            RecordType::Uri => "URI",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record_type = match s {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "AFSDB" => RecordType::Afsdb,
            "ALIAS" => RecordType::Alias,
            "CAA" => RecordType::Caa,
            "CERT" => RecordType::Cert,
            "CNAME" => RecordType::Cname,
            "HINFO" => RecordType::Hinfo,
            "KEY" => RecordType::Key,
            "LOC" => RecordType::Loc,
            "MX" => RecordType::Mx,
            "NAPTR" => RecordType::Naptr,
            "NS" => RecordType::Ns,
            "OPENPGPKEY" => RecordType::Openpgpkey,
            "PTR" => RecordType::Ptr,
            "RP" => RecordType::Rp,
            "SOA" => RecordType::Soa,
            "SRV" => RecordType::Srv,
            "SSHFP" => RecordType::Sshfp,
            "TLSA" => RecordType::Tlsa,
            "TXT" => RecordType::Txt,
            "URI" => RecordType::Uri,
            other => {
                return Err(Error::InvalidRecordType {
                    value: other.to_string(),
                });
            }
        };

        Ok(record_type)
    }
}

/// One nameserver record as returned by a record-listing call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameServerRecord {
    /// Provider-assigned record id
    pub id: RecordId,
    /// Fully qualified record name
    pub name: String,
    /// DNS record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record content (address, target name, text, ...)
    pub content: String,
    /// Cache lifetime in seconds
    pub ttl_seconds: u64,
    /// Record priority (MX and SRV; zero elsewhere)
    pub prio: i64,
}

/// An API password. Never rendered in clear text by `Debug` or `Display`;
/// both show one asterisk per character instead.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a clear-text password
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The clear-text value, for building API request bodies only
    pub fn reveal(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

/// Username and password for the provider API
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_wire_names() {
        assert_eq!("A".parse::<RecordType>().unwrap(), RecordType::A);
        assert_eq!("AAAA".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert_eq!("CNAME".parse::<RecordType>().unwrap(), RecordType::Cname);
    }

    #[test]
    fn record_type_rejects_unknown_names() {
        let err = "BOGUS".parse::<RecordType>().unwrap_err();
        assert!(matches!(err, Error::InvalidRecordType { value } if value == "BOGUS"));
    }

    #[test]
    fn record_type_is_case_sensitive() {
        assert!("aaaa".parse::<RecordType>().is_err());
    }

    #[test]
    fn password_is_masked_in_debug_output() {
        let password = Password::new("hunter2");
        assert_eq!(format!("{:?}", password), "*******");
        assert_eq!(password.to_string(), "*******");
        assert_eq!(password.reveal(), "hunter2");
    }

    #[test]
    fn sentinel_record_id() {
        assert!(RecordId(0).is_sentinel());
        assert!(!RecordId(42).is_sentinel());
    }

    #[test]
    fn nameserver_record_serializes_wire_type_name() {
        let record = NameServerRecord {
            id: RecordId(7),
            name: "example.org".to_string(),
            record_type: RecordType::Aaaa,
            content: "2001:db8::1".to_string(),
            ttl_seconds: 300,
            prio: 0,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "AAAA");
        assert_eq!(json["id"], 7);
    }
}
