//! Localized labels.
//!
//! Translation lookup is an injected capability: anything implementing
//! [`LabelResolver`] can back the `human_*` accessors. Lookups are made on every
//! call, so switching the active locale is picked up immediately.
//!
//! ## Lookup Keys
//!
//! | Label | Key |
//! |-------|-----|
//! | Enum value | `enum_accessor.<model>.<attribute>.<key>` |
//! | Attribute name | `attributes.<model>.<attribute>` |
//!
//! When a key has no translation the label falls back to [`humanize`].

use serde_json::Value;
use std::collections::HashMap;

/// Resolves dotted translation keys in the active locale.
pub trait LabelResolver {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Resolver with no translations; every label is humanized.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabels;

impl LabelResolver for NoLabels {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

pub(crate) fn value_key(model: &str, attribute: &str, key: &str) -> String {
    format!("enum_accessor.{}.{}.{}", model, attribute, key)
}

pub(crate) fn attribute_key(model: &str, attribute: &str) -> String {
    format!("attributes.{}.{}", model, attribute)
}

/// Turn an identifier into a label: `"in_progress"` becomes `"In progress"`.
///
/// A trailing `_id` is dropped, underscores become spaces and only the first
/// letter is upper-cased.
pub fn humanize(key: &str) -> String {
    let base = key.strip_suffix("_id").unwrap_or(key);
    let spaced = base.replace('_', " ").trim().to_lowercase();

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// In-memory translations keyed by locale.
///
/// ```
/// use enum_accessor::labels::{LabelResolver, StaticLabels};
///
/// let mut labels = StaticLabels::new("en");
/// labels.insert("ja", "enum_accessor.user.gender.female", "女");
/// labels.set_locale("ja");
/// assert_eq!(labels.lookup("enum_accessor.user.gender.female").as_deref(), Some("女"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLabels {
    locale: String,
    translations: HashMap<String, HashMap<String, String>>,
}

impl StaticLabels {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            translations: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn insert(&mut self, locale: &str, key: &str, label: impl Into<String>) {
        self.translations
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), label.into());
    }

    /// Load a nested translation tree for `locale`.
    ///
    /// Nested objects are flattened into dotted keys, so
    /// `{"enum_accessor": {"user": {"gender": {"male": "Male"}}}}` registers
    /// `enum_accessor.user.gender.male`. Non-string leaves are ignored.
    pub fn insert_tree(&mut self, locale: &str, tree: &Value) {
        let mut flat = Vec::new();
        flatten("", tree, &mut flat);
        for (key, label) in flat {
            self.insert(locale, &key, label);
        }
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                flatten(&key, child, out);
            }
        }
        Value::String(label) if !prefix.is_empty() => out.push((prefix.to_string(), label.clone())),
        _ => {}
    }
}

impl LabelResolver for StaticLabels {
    fn lookup(&self, key: &str) -> Option<String> {
        self.translations.get(&self.locale)?.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("female"), "Female");
        assert_eq!(humanize("in_progress"), "In progress");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("ALL_CAPS"), "All caps");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_no_labels() {
        assert_eq!(NoLabels.lookup("anything"), None);
    }

    #[test]
    fn test_lookup_follows_locale() {
        let mut labels = StaticLabels::new("en");
        labels.insert("en", "greeting", "Hello");
        labels.insert("ja", "greeting", "こんにちは");

        assert_eq!(labels.lookup("greeting").as_deref(), Some("Hello"));
        labels.set_locale("ja");
        assert_eq!(labels.lookup("greeting").as_deref(), Some("こんにちは"));
        labels.set_locale("fr");
        assert_eq!(labels.lookup("greeting"), None);
    }

    #[test]
    fn test_insert_tree_flattens() {
        let mut labels = StaticLabels::new("en");
        labels.insert_tree(
            "en",
            &json!({
                "enum_accessor": { "user": { "gender": { "female": "Female", "male": "Male" } } },
                "attributes": { "user": { "gender": "Gender", "age": 3 } }
            }),
        );

        assert_eq!(
            labels.lookup("enum_accessor.user.gender.male").as_deref(),
            Some("Male")
        );
        assert_eq!(labels.lookup("attributes.user.gender").as_deref(), Some("Gender"));
        assert_eq!(labels.lookup("attributes.user.age"), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(value_key("user", "gender", "male"), "enum_accessor.user.gender.male");
        assert_eq!(attribute_key("user", "gender"), "attributes.user.gender");
    }
}
