//! Enum definitions as declared by model authors.
//!
//! A definition comes in one of two shapes:
//!
//! | Shape | Example | Raw values |
//! |-------|---------|------------|
//! | `List` | `["female", "male"]` | list position + start index |
//! | `Explicit` | `{"female": 100, "male": 200}` | used as supplied |
//!
//! Definitions are unchecked until they are resolved into a
//! [`CanonicalMapping`](crate::mapping::CanonicalMapping). JSON objects are read
//! entry by entry, so a repeated key survives parsing and is rejected there.

use crate::keys::SymbolicKey;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A declarative enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumDefinition {
    /// Ordered keys; raw values are derived from positions.
    List(Vec<String>),

    /// Key to raw value pairs, in declared order.
    Explicit(Vec<(String, i64)>),
}

impl EnumDefinition {
    /// Build an ordered list definition.
    pub fn list<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        EnumDefinition::List(keys.into_iter().map(|k| k.as_ref().to_string()).collect())
    }

    /// Build an explicit key to raw value definition.
    pub fn explicit<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        EnumDefinition::Explicit(
            pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v))
                .collect(),
        )
    }

    /// Ordered list definition taken from a generated key enum.
    pub fn from_keys<K: SymbolicKey>() -> Self {
        Self::list(K::ALL.iter().map(|k| k.as_str()))
    }

    /// Parse a JSON definition: an array of keys or an object of key to raw value.
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        match self {
            EnumDefinition::List(keys) => keys.len(),
            EnumDefinition::Explicit(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accepts an array of keys or an object of key to raw value.
impl<'de> Deserialize<'de> for EnumDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DefinitionVisitor)
    }
}

struct DefinitionVisitor;

impl<'de> Visitor<'de> for DefinitionVisitor {
    type Value = EnumDefinition;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of keys or an object of key to raw value")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut keys = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(key) = seq.next_element::<String>()? {
            keys.push(key);
        }
        Ok(EnumDefinition::List(keys))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, raw)) = map.next_entry::<String, i64>()? {
            pairs.push((key, raw));
        }
        Ok(EnumDefinition::Explicit(pairs))
    }
}

impl<K: AsRef<str>, const N: usize> From<[K; N]> for EnumDefinition {
    fn from(keys: [K; N]) -> Self {
        Self::list(keys)
    }
}
