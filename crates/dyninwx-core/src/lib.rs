//! # dyninwx-core
//!
//! Shared foundation for the dyninwx dynamic-DNS updater:
//!
//! - **config**: the flat `key=value` settings format, its normalization
//!   into a tree of scalars, lists and indexed maps, and the projection
//!   into typed [`Settings`]
//! - **types**: record ids, DNS record types, nameserver records and API
//!   credentials
//! - **error**: the error taxonomy shared by all dyninwx crates
//!
//! All of it is pure, synchronous data transformation; I/O lives in the
//! sibling crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigTree, PropertyValue, RecordConfiguration, Settings};
pub use error::{Error, Result};
pub use types::{Credentials, NameServerRecord, Password, RecordId, RecordType};
