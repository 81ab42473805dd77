//! Canonical key ↔ raw value mapping.
//!
//! A [`CanonicalMapping`] is resolved once per declared attribute and never
//! changes afterwards. Everything the accessor layer exposes (readers, writers,
//! predicates, labels, scopes and validation) is derived from it.

use crate::config::Configuration;
use crate::definition::EnumDefinition;
use crate::error::{EnumError, Result};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Resolved, immutable mapping between symbolic keys and raw values.
///
/// Keys keep their declared order. Both directions are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMapping {
    by_key: IndexMap<String, i64>,
    by_raw: HashMap<i64, usize>,
}

impl CanonicalMapping {
    /// Resolve `definition` for `attribute`.
    ///
    /// List positions are offset by the start index of `config` as it is right
    /// now. Explicit raw values are taken as supplied.
    ///
    /// Fails on duplicate keys, duplicate raw values or an empty definition.
    pub fn resolve(
        attribute: &str,
        definition: &EnumDefinition,
        config: &Configuration,
    ) -> Result<Self> {
        if definition.is_empty() {
            return Err(EnumError::EmptyDefinition(attribute.to_string()));
        }

        let pairs: Vec<(&str, i64)> = match definition {
            EnumDefinition::List(keys) => {
                let offset = config.get().offset();
                keys.iter()
                    .zip(0_i64..)
                    .map(|(key, position)| (key.as_str(), position + offset))
                    .collect()
            }
            EnumDefinition::Explicit(pairs) => {
                pairs.iter().map(|(key, raw)| (key.as_str(), *raw)).collect()
            }
        };

        let mut by_key = IndexMap::with_capacity(pairs.len());
        let mut by_raw = HashMap::with_capacity(pairs.len());

        for (key, raw) in pairs {
            if by_key.contains_key(key) {
                return Err(EnumError::DuplicateKey {
                    attribute: attribute.to_string(),
                    key: key.to_string(),
                });
            }
            if by_raw.contains_key(&raw) {
                return Err(EnumError::DuplicateValue {
                    attribute: attribute.to_string(),
                    value: raw,
                });
            }
            by_raw.insert(raw, by_key.len());
            by_key.insert(key.to_string(), raw);
        }

        Ok(Self { by_key, by_raw })
    }

    /// Raw value for `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Option<i64> {
        self.by_key.get(key.as_ref()).copied()
    }

    /// Key that maps to `raw`.
    pub fn key_for(&self, raw: i64) -> Option<&str> {
        let index = *self.by_raw.get(&raw)?;
        self.by_key.get_index(index).map(|(key, _)| key.as_str())
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.by_key.contains_key(key.as_ref())
    }

    pub fn contains_raw(&self, raw: i64) -> bool {
        self.by_raw.contains_key(&raw)
    }

    /// Keys in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    /// Raw values in declared order.
    pub fn raw_values(&self) -> impl Iterator<Item = i64> + '_ {
        self.by_key.values().copied()
    }

    /// `(key, raw)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.by_key.iter().map(|(key, raw)| (key.as_str(), *raw))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// The mapping as an ordered map.
    pub fn as_map(&self) -> &IndexMap<String, i64> {
        &self.by_key
    }
}

impl Serialize for CanonicalMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.by_key.serialize(serializer)
    }
}
