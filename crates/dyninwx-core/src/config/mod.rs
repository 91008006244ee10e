//! Configuration loading: flat property entries are normalized into a
//! [`tree::ConfigTree`] and projected into typed [`settings::Settings`].

pub mod keypath;
pub mod properties;
pub mod settings;
pub mod tree;

pub use keypath::{KeyPath, classify};
pub use settings::{RecordConfiguration, Settings};
pub use tree::{ConfigTree, PropertyValue};
