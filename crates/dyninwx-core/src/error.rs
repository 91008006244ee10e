//! Error types for the dyninwx crates.

use thiserror::Error;

/// Result type alias for dyninwx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type shared by all dyninwx crates
#[derive(Error, Debug)]
pub enum Error {
    /// A flattened property key was re-bound to a different value kind
    #[error("cannot add key [{key}]: a {existing} value already exists, refusing to bind a {incoming} value")]
    TypeConflict {
        /// The base key that was written twice with different shapes
        key: String,
        /// Kind name of the value already bound to the key
        existing: &'static str,
        /// Kind name of the value being added
        incoming: &'static str,
    },

    /// A bracket index did not parse as a list position
    #[error("cannot add key [{key}]: index [{index}] is not a valid position")]
    InvalidIndex {
        /// The full property key carrying the index
        key: String,
        /// The raw index digits
        index: String,
    },

    /// A settings key was bound to a value kind the projector cannot use
    #[error("setting [{key}] has unexpected shape: expected {expected}, found {found}")]
    UnexpectedShape {
        /// The settings key being projected
        key: String,
        /// Kind name the projector requires
        expected: &'static str,
        /// Kind name actually found in the tree
        found: &'static str,
    },

    /// A record entry's `id` field was missing or not numeric
    #[error("record IDs must be numeric, but found entry: {entry}")]
    InvalidRecordId {
        /// Rendering of the offending entry's fields
        entry: String,
    },

    /// A pool entry did not parse as a URI
    #[error("invalid URI in setting [{key}]: [{value}]")]
    InvalidUri {
        /// The settings key holding the pool
        key: String,
        /// The string that failed to parse
        value: String,
    },

    /// A duration-valued setting did not parse as a number
    #[error("invalid duration in setting [{key}]: [{value}]")]
    InvalidDuration {
        /// The settings key (or record entry) holding the duration
        key: String,
        /// The raw value that failed to parse
        value: String,
    },

    /// A nameserver record carried an unknown DNS record type
    #[error("unknown DNS record type: [{value}]")]
    InvalidRecordType {
        /// The type string from the response
        value: String,
    },

    /// An XML-RPC response body could not be parsed at all
    #[error("cannot parse XML-RPC response: {message}")]
    ParseFailure {
        /// Description of the underlying parse error
        message: String,
    },

    /// Credentials were demanded but not configured
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O errors (settings file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An ident endpoint answered with an empty body
    #[error("empty response from ident service [{url}]")]
    EmptyIdentResponse {
        /// The ident endpoint that answered
        url: String,
    },

    /// An ident endpoint answered with something that is not an address
    #[error("not a valid {family} address: [{value}]")]
    InvalidAddress {
        /// Address family that was requested
        family: &'static str,
        /// The body that failed to parse
        value: String,
    },
}

impl Error {
    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a parse failure from an underlying error
    pub fn parse_failure(cause: impl std::fmt::Display) -> Self {
        Self::ParseFailure {
            message: cause.to_string(),
        }
    }
}
