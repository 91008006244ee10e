//! Normalized configuration tree built from flat property entries.

use std::collections::{BTreeMap, HashMap};

use crate::config::keypath::{self, KeyPath};
use crate::error::{Error, Result};

/// One normalized configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A single string value
    Scalar(String),
    /// An ordered list of string values
    List(Vec<String>),
    /// Map from bracket index to a field map
    IndexedMap(BTreeMap<u64, BTreeMap<String, String>>),
}

impl PropertyValue {
    /// Human-readable kind name, used in conflict diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Scalar(_) => "scalar",
            PropertyValue::List(_) => "list",
            PropertyValue::IndexedMap(_) => "indexed map",
        }
    }
}

/// Normalized view of a flat property file.
///
/// Built once per configuration load through [`ConfigTree::add`]; a base
/// key is bound to exactly one [`PropertyValue`] kind for its lifetime,
/// and writes of a different kind fail with [`Error::TypeConflict`].
/// Base keys iterate in first-insertion order, which is observable but
/// carries no meaning for projection.
#[derive(Debug, Default)]
pub struct ConfigTree {
    values: HashMap<String, PropertyValue>,
    order: Vec<String>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(key, value)` pairs in input order.
    pub fn from_entries<K, V, I>(entries: I) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new();
        for (key, value) in entries {
            tree.add(key.as_ref(), value.as_ref())?;
        }
        Ok(tree)
    }

    /// Add one raw property entry.
    ///
    /// The key is classified and merged into the tree:
    ///
    /// - plain keys bind (or overwrite) a scalar,
    /// - `base[n]` appends to the list at `base` (the index is ignored),
    /// - `base[n].field` sets one field of the map entry at `n`, where a
    ///   repeated field at the same index overwrites (last write wins).
    pub fn add(&mut self, key: &str, value: &str) -> Result<()> {
        match keypath::classify(key) {
            KeyPath::Plain => self.add_scalar(key, value),
            KeyPath::ListEntry { base, .. } => self.add_list_entry(base, value),
            KeyPath::MapEntry { base, index, field } => {
                let index = parse_index(key, index)?;
                self.add_map_entry(base, index, field, value)
            }
        }
    }

    fn add_scalar(&mut self, key: &str, value: &str) -> Result<()> {
        match self.values.get_mut(key) {
            None => {
                self.bind(key, PropertyValue::Scalar(value.to_string()));
                Ok(())
            }
            Some(PropertyValue::Scalar(existing)) => {
                *existing = value.to_string();
                Ok(())
            }
            Some(other) => Err(Error::TypeConflict {
                key: key.to_string(),
                existing: other.kind(),
                incoming: "scalar",
            }),
        }
    }

    fn add_list_entry(&mut self, base: &str, value: &str) -> Result<()> {
        match self.values.get_mut(base) {
            None => {
                self.bind(base, PropertyValue::List(vec![value.to_string()]));
                Ok(())
            }
            Some(PropertyValue::List(existing)) => {
                existing.push(value.to_string());
                Ok(())
            }
            Some(other) => Err(Error::TypeConflict {
                key: base.to_string(),
                existing: other.kind(),
                incoming: "list",
            }),
        }
    }

    fn add_map_entry(&mut self, base: &str, index: u64, field: &str, value: &str) -> Result<()> {
        tracing::trace!(key = base, index, field, "adding indexed map entry");

        match self.values.get_mut(base) {
            None => {
                let mut fields = BTreeMap::new();
                fields.insert(field.to_string(), value.to_string());
                let mut entries = BTreeMap::new();
                entries.insert(index, fields);
                self.bind(base, PropertyValue::IndexedMap(entries));
                Ok(())
            }
            Some(PropertyValue::IndexedMap(entries)) => {
                entries
                    .entry(index)
                    .or_default()
                    .insert(field.to_string(), value.to_string());
                Ok(())
            }
            Some(other) => Err(Error::TypeConflict {
                key: base.to_string(),
                existing: other.kind(),
                incoming: "indexed map",
            }),
        }
    }

    fn bind(&mut self, key: &str, value: PropertyValue) {
        self.order.push(key.to_string());
        self.values.insert(key.to_string(), value);
    }

    /// Look up the value bound to a base key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Iterate base keys and values in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.order
            .iter()
            .filter_map(|key| self.values.get(key).map(|value| (key.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_index(key: &str, index: &str) -> Result<u64> {
    index.parse().map_err(|_| Error::InvalidIndex {
        key: key.to_string(),
        index: index.to_string(),
    })
}
