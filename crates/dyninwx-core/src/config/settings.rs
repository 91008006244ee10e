//! Projection of a [`ConfigTree`] into typed updater settings.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::config::properties;
use crate::config::tree::{ConfigTree, PropertyValue};
use crate::error::{Error, Result};
use crate::types::{Credentials, Password, RecordId};

const INWX_USERNAME: &str = "jdynsinwx.inwx.username";
const INWX_PASSWORD: &str = "jdynsinwx.inwx.password";
const INWX_API_ENDPOINT: &str = "jdynsinwx.inwx.api.endpoint";
const INWX_RECORDS_IPV4: &str = "jdynsinwx.inwx.record.ipv4";
const INWX_RECORDS_IPV6: &str = "jdynsinwx.inwx.record.ipv6";
const IDENT_POOL_IPV4: &str = "jdynsinwx.ident.pool.ipv4";
const IDENT_POOL_IPV6: &str = "jdynsinwx.ident.pool.ipv6";
const IDENT_REQUEST_TIMEOUT: &str = "jdynsinwx.ident.connection.request.timeout";

/// TTL applied to record entries that do not configure one
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Connect timeout for ident and API requests (not configurable)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Request timeout applied when the settings file does not configure one
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(1500);

/// One DNS record to keep in sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordConfiguration {
    /// Provider-assigned record id
    pub record_id: RecordId,
    /// TTL to push with every update
    pub ttl: Duration,
}

/// Typed updater settings, projected once per configuration load.
///
/// The IPv4 and IPv6 ident pools are separate fields on purpose: the update
/// paths for the two families must not share resolver endpoints.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub password: Password,
    pub api_endpoint: Option<Url>,
    pub ipv4_records: Vec<RecordConfiguration>,
    pub ipv6_records: Vec<RecordConfiguration>,
    pub ident_pool_ipv4: Vec<Url>,
    pub ident_pool_ipv6: Vec<Url>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    /// Load and project a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = properties::load(path)?;
        let tree = ConfigTree::from_entries(entries)?;
        Self::project(&tree)
    }

    /// Parse and project settings text.
    pub fn from_properties_str(text: &str) -> Result<Self> {
        let tree = ConfigTree::from_entries(properties::parse(text))?;
        Self::project(&tree)
    }

    /// Project a built tree into typed settings.
    ///
    /// Absent optional keys fall back to their defaults; structurally wrong
    /// values abort the load. No partial settings are ever produced.
    pub fn project(tree: &ConfigTree) -> Result<Self> {
        Ok(Self {
            username: scalar(tree, INWX_USERNAME)?.unwrap_or_default().to_string(),
            password: Password::new(scalar(tree, INWX_PASSWORD)?.unwrap_or_default()),
            api_endpoint: api_endpoint(tree)?,
            ipv4_records: record_configurations(tree, INWX_RECORDS_IPV4)?,
            ipv6_records: record_configurations(tree, INWX_RECORDS_IPV6)?,
            ident_pool_ipv4: uri_pool(tree, IDENT_POOL_IPV4)?,
            ident_pool_ipv6: uri_pool(tree, IDENT_POOL_IPV6)?,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: request_timeout(tree)?,
        })
    }

    /// The configured API credentials.
    ///
    /// Credentials are only demanded when an API call is about to be made;
    /// projection succeeds without them.
    pub fn credentials(&self) -> Result<Credentials> {
        if self.username.trim().is_empty() {
            return Err(Error::MissingCredential("username"));
        }
        if self.password.is_empty() {
            return Err(Error::MissingCredential("password"));
        }

        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings[username={}, password={}, api_endpoint={}, \
             ipv4_records={}, ipv6_records={}, ident_pool_ipv4={}, ident_pool_ipv6={}, \
             connect_timeout={:?}, request_timeout={:?}]",
            self.username,
            self.password,
            self.api_endpoint
                .as_ref()
                .map_or_else(|| "<default>".to_string(), Url::to_string),
            self.ipv4_records.len(),
            self.ipv6_records.len(),
            self.ident_pool_ipv4.len(),
            self.ident_pool_ipv6.len(),
            self.connect_timeout,
            self.request_timeout,
        )
    }
}

fn scalar<'a>(tree: &'a ConfigTree, key: &str) -> Result<Option<&'a str>> {
    match tree.get(key) {
        None => Ok(None),
        Some(PropertyValue::Scalar(value)) => Ok(Some(value)),
        Some(other) => Err(Error::UnexpectedShape {
            key: key.to_string(),
            expected: "scalar",
            found: other.kind(),
        }),
    }
}

fn api_endpoint(tree: &ConfigTree) -> Result<Option<Url>> {
    let Some(raw) = scalar(tree, INWX_API_ENDPOINT)? else {
        return Ok(None);
    };

    let url = Url::parse(raw).map_err(|_| Error::InvalidUri {
        key: INWX_API_ENDPOINT.to_string(),
        value: raw.to_string(),
    })?;
    Ok(Some(url))
}

fn record_configurations(tree: &ConfigTree, key: &str) -> Result<Vec<RecordConfiguration>> {
    let entries = match tree.get(key) {
        None => return Ok(Vec::new()),
        Some(PropertyValue::IndexedMap(entries)) => entries,
        Some(other) => {
            return Err(Error::UnexpectedShape {
                key: key.to_string(),
                expected: "indexed map",
                found: other.kind(),
            });
        }
    };

    entries
        .iter()
        .map(|(index, fields)| {
            let id: i64 = fields
                .get("id")
                .and_then(|raw| raw.parse().ok())
                .ok_or_else(|| Error::InvalidRecordId {
                    entry: format!("{key}[{index}] -> {fields:?}"),
                })?;

            // A fully absent ttl field defaults; a present one must parse.
            let ttl = match fields.get("ttl") {
                None => DEFAULT_TTL,
                Some(raw) => {
                    let seconds: u64 = raw.parse().map_err(|_| Error::InvalidDuration {
                        key: format!("{key}[{index}].ttl"),
                        value: raw.clone(),
                    })?;
                    Duration::from_secs(seconds)
                }
            };

            Ok(RecordConfiguration {
                record_id: RecordId(id),
                ttl,
            })
        })
        .collect()
}

fn uri_pool(tree: &ConfigTree, key: &str) -> Result<Vec<Url>> {
    let items = match tree.get(key) {
        None => return Ok(Vec::new()),
        Some(PropertyValue::List(items)) => items,
        Some(other) => {
            return Err(Error::UnexpectedShape {
                key: key.to_string(),
                expected: "list",
                found: other.kind(),
            });
        }
    };

    items
        .iter()
        .map(|raw| {
            Url::parse(raw).map_err(|_| Error::InvalidUri {
                key: key.to_string(),
                value: raw.clone(),
            })
        })
        .collect()
}

fn request_timeout(tree: &ConfigTree) -> Result<Duration> {
    // A non-scalar binding silently falls back to the default here; only a
    // scalar that fails the numeric parse is a configuration error.
    let Some(PropertyValue::Scalar(raw)) = tree.get(IDENT_REQUEST_TIMEOUT) else {
        return Ok(DEFAULT_REQUEST_TIMEOUT);
    };

    let millis: u64 = raw.parse().map_err(|_| {
        tracing::error!(
            key = IDENT_REQUEST_TIMEOUT,
            value = raw.as_str(),
            "invalid request timeout setting"
        );
        Error::InvalidDuration {
            key: IDENT_REQUEST_TIMEOUT.to_string(),
            value: raw.clone(),
        }
    })?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PROPERTIES: &str = "\
        jdynsinwx.inwx.username=updater\n\
        jdynsinwx.inwx.password=correct horse battery staple\n\
        jdynsinwx.inwx.api.endpoint=https://api.example.org/xmlrpc\n\
        jdynsinwx.inwx.record.ipv4[1].id=41\n\
        jdynsinwx.inwx.record.ipv4[1].ttl=300\n\
        jdynsinwx.inwx.record.ipv4[2].id=42\n\
        jdynsinwx.inwx.record.ipv4[2].ttl=300\n\
        jdynsinwx.inwx.record.ipv6[1].id=43\n\
        jdynsinwx.ident.pool.ipv4[1]=https://ipv4.ident.example/\n\
        jdynsinwx.ident.pool.ipv6[1]=https://ipv6.ident.example/\n\
        jdynsinwx.ident.connection.request.timeout=2000\n";

    #[test]
    fn projects_a_complete_configuration() {
        let settings = Settings::from_properties_str(FULL_PROPERTIES).unwrap();

        assert_eq!(settings.username, "updater");
        assert_eq!(settings.password.len(), 28);
        assert_eq!(
            settings.api_endpoint.as_ref().map(Url::as_str),
            Some("https://api.example.org/xmlrpc")
        );
        assert_eq!(settings.ipv4_records.len(), 2);
        assert_eq!(settings.ipv6_records.len(), 1);
        assert_eq!(settings.ident_pool_ipv4.len(), 1);
        assert_eq!(settings.ident_pool_ipv6.len(), 1);
        assert_eq!(settings.request_timeout, Duration::from_millis(2000));
        assert_eq!(settings.connect_timeout, Duration::from_millis(500));
    }

    #[test]
    fn records_project_in_index_order() {
        let settings = Settings::from_properties_str(FULL_PROPERTIES).unwrap();

        let ids: Vec<i64> = settings
            .ipv4_records
            .iter()
            .map(|record| record.record_id.0)
            .collect();
        assert_eq!(ids, vec![41, 42]);
        assert!(settings
            .ipv4_records
            .iter()
            .all(|record| record.ttl == Duration::from_secs(300)));
    }

    #[test]
    fn absent_ttl_defaults_to_300_seconds() {
        let settings =
            Settings::from_properties_str("jdynsinwx.inwx.record.ipv4[1].id=41\n").unwrap();

        assert_eq!(settings.ipv4_records[0].ttl, DEFAULT_TTL);
    }

    #[test]
    fn present_but_unparseable_ttl_fails() {
        let err = Settings::from_properties_str(
            "jdynsinwx.inwx.record.ipv4[1].id=41\n\
             jdynsinwx.inwx.record.ipv4[1].ttl=abc\n",
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidDuration { value, .. } if value == "abc"));
    }

    #[test]
    fn non_numeric_record_id_fails() {
        let err =
            Settings::from_properties_str("jdynsinwx.inwx.record.ipv4[1].id=forty-one\n")
                .unwrap_err();

        assert!(matches!(err, Error::InvalidRecordId { .. }));
        assert!(err.to_string().contains("forty-one"));
    }

    #[test]
    fn missing_record_id_fails() {
        let err =
            Settings::from_properties_str("jdynsinwx.inwx.record.ipv4[1].ttl=300\n").unwrap_err();

        assert!(matches!(err, Error::InvalidRecordId { .. }));
    }

    #[test]
    fn records_bound_to_a_list_fail_with_unexpected_shape() {
        let err =
            Settings::from_properties_str("jdynsinwx.inwx.record.ipv4[1]=41\n").unwrap_err();

        assert!(matches!(
            err,
            Error::UnexpectedShape {
                expected: "indexed map",
                ..
            }
        ));
    }

    #[test]
    fn pool_bound_to_a_scalar_fails_with_unexpected_shape() {
        let err =
            Settings::from_properties_str("jdynsinwx.ident.pool.ipv4=https://a.example/\n")
                .unwrap_err();

        assert!(matches!(
            err,
            Error::UnexpectedShape {
                expected: "list",
                ..
            }
        ));
    }

    #[test]
    fn invalid_pool_entry_fails_naming_the_value() {
        let err = Settings::from_properties_str(
            "jdynsinwx.ident.pool.ipv6[1]=not a uri at all\n",
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidUri { value, .. } if value == "not a uri at all"));
    }

    #[test]
    fn timeouts_default_when_absent() {
        let settings = Settings::from_properties_str("").unwrap();

        assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(settings.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn unparseable_request_timeout_fails() {
        let err = Settings::from_properties_str(
            "jdynsinwx.ident.connection.request.timeout=soon\n",
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidDuration { value, .. } if value == "soon"));
    }

    #[test]
    fn absent_credentials_project_but_cannot_be_demanded() {
        let settings = Settings::from_properties_str("").unwrap();

        assert!(settings.username.is_empty());
        assert!(settings.password.is_empty());
        assert!(matches!(
            settings.credentials().unwrap_err(),
            Error::MissingCredential(_)
        ));
    }

    #[test]
    fn credentials_are_returned_when_configured() {
        let settings = Settings::from_properties_str(
            "jdynsinwx.inwx.username=updater\n\
             jdynsinwx.inwx.password=s3cret\n",
        )
        .unwrap();

        let credentials = settings.credentials().unwrap();
        assert_eq!(credentials.username, "updater");
        assert_eq!(credentials.password.reveal(), "s3cret");
    }

    #[test]
    fn display_masks_the_password() {
        let settings = Settings::from_properties_str(
            "jdynsinwx.inwx.username=updater\n\
             jdynsinwx.inwx.password=s3cret\n",
        )
        .unwrap();

        let rendered = settings.to_string();
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("******"));
    }
}
