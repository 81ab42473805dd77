//! # Enum Attributes
//!
//! An [`EnumAttribute`] binds one attribute of one model type to its
//! [`CanonicalMapping`]. It is created at declaration time and shared by every
//! record of that model type; all accessors take the record explicitly.
//!
//! ## Accessors
//!
//! | Accessor | Scope | Returns |
//! |----------|-------|---------|
//! | [`values`](EnumAttribute::values) | model | the mapping, key → raw |
//! | [`human_values`](EnumAttribute::human_values) | model | key → localized label |
//! | [`where_in`](EnumAttribute::where_in) | model | query restricted to the given keys |
//! | [`get`](EnumAttribute::get) | record | current key, `None` if unset or unmapped |
//! | [`set`](EnumAttribute::set) | record | writes the raw value of a key, unset if unknown |
//! | [`raw`](EnumAttribute::raw) | record | stored raw value |
//! | [`is`](EnumAttribute::is) | record | whether the current key equals a key |
//! | [`human`](EnumAttribute::human) | record | localized label of the current key |
//!
//! Runtime lookups never fail. Unknown raw values read as `None` and unknown
//! keys are written as unset; both surface only through validation.

use crate::keys::SymbolicKey;
use crate::labels::{self, LabelResolver};
use crate::mapping::CanonicalMapping;
use crate::store::{AttributeStore, QueryBuilder};
use crate::validation::{InclusionRule, ValidationPolicy};
use indexmap::IndexMap;

/// A value handed to [`EnumAttribute::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumInput {
    /// A symbolic key, by name.
    Key(String),

    /// A raw value, as read back from storage or from [`EnumAttribute::values`].
    Raw(i64),

    Unset,
}

impl From<&str> for EnumInput {
    fn from(key: &str) -> Self {
        EnumInput::Key(key.to_string())
    }
}

impl From<String> for EnumInput {
    fn from(key: String) -> Self {
        EnumInput::Key(key)
    }
}

impl From<&String> for EnumInput {
    fn from(key: &String) -> Self {
        EnumInput::Key(key.clone())
    }
}

impl From<i64> for EnumInput {
    fn from(raw: i64) -> Self {
        EnumInput::Raw(raw)
    }
}

impl From<i32> for EnumInput {
    fn from(raw: i32) -> Self {
        EnumInput::Raw(i64::from(raw))
    }
}

impl<T: Into<EnumInput>> From<Option<T>> for EnumInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(EnumInput::Unset)
    }
}

/// Localized labels, one per declared key, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanValues(IndexMap<String, String>);

impl HumanValues {
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.0.get(key.as_ref()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, label)| (key.as_str(), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

/// Binding of one model attribute to its canonical mapping.
#[derive(Debug, Clone)]
pub struct EnumAttribute {
    model: String,
    name: String,
    mapping: CanonicalMapping,
    validation: ValidationPolicy,
}

impl EnumAttribute {
    pub(crate) fn new(
        model: &str,
        name: &str,
        mapping: CanonicalMapping,
        validation: ValidationPolicy,
    ) -> Self {
        Self {
            model: model.to_string(),
            name: name.to_string(),
            mapping,
            validation,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    // --- Model-level ---

    /// The canonical mapping, key → raw value.
    pub fn values(&self) -> &CanonicalMapping {
        &self.mapping
    }

    /// Localized label for every declared key.
    ///
    /// Resolved on each call against the resolver's active locale.
    pub fn human_values<L: LabelResolver + ?Sized>(&self, labels: &L) -> HumanValues {
        HumanValues(
            self.mapping
                .keys()
                .map(|key| (key.to_string(), self.label_for(key, labels)))
                .collect(),
        )
    }

    /// Localized name of the attribute itself.
    pub fn human_attribute_name<L: LabelResolver + ?Sized>(&self, labels: &L) -> String {
        labels
            .lookup(&labels::attribute_key(&self.model, &self.name))
            .unwrap_or_else(|| labels::humanize(&self.name))
    }

    /// Restrict `query` to records whose value is one of `keys`.
    ///
    /// Keys with no mapping are skipped; if none match, the query matches nothing.
    pub fn where_in<Q, K>(&self, query: Q, keys: &[K]) -> Q::Output
    where
        Q: QueryBuilder,
        K: AsRef<str>,
    {
        let raw_values: Vec<i64> = keys.iter().filter_map(|key| self.mapping.get(key)).collect();
        query.where_in(&self.name, &raw_values)
    }

    // --- Record-level ---

    /// Current key, `None` when unset or when the stored raw value has no key.
    pub fn get<S: AttributeStore + ?Sized>(&self, record: &S) -> Option<&str> {
        let raw = record.read_attribute(&self.name)?;
        let key = self.mapping.key_for(raw);
        if key.is_none() {
            tracing::trace!(
                model = %self.model,
                attribute = %self.name,
                raw,
                "stored value has no key"
            );
        }
        key
    }

    /// Current key as a compile-time key enum.
    pub fn get_as<K: SymbolicKey>(&self, record: &(impl AttributeStore + ?Sized)) -> Option<K> {
        self.get(record).and_then(K::from_key)
    }

    /// Write the raw value of `value`.
    ///
    /// Accepts a key or a raw value. Anything that does not resolve to a
    /// declared key is written as unset.
    pub fn set<S, V>(&self, record: &mut S, value: V)
    where
        S: AttributeStore + ?Sized,
        V: Into<EnumInput>,
    {
        let input = value.into();
        let raw = match &input {
            EnumInput::Key(key) => self.mapping.get(key),
            EnumInput::Raw(raw) => Some(*raw).filter(|raw| self.mapping.contains_raw(*raw)),
            EnumInput::Unset => None,
        };

        if raw.is_none() && input != EnumInput::Unset {
            tracing::trace!(
                model = %self.model,
                attribute = %self.name,
                ?input,
                "unknown value written as unset"
            );
        }
        record.write_attribute(&self.name, raw);
    }

    /// Stored raw value, bypassing the mapping.
    pub fn raw<S: AttributeStore + ?Sized>(&self, record: &S) -> Option<i64> {
        record.read_attribute(&self.name)
    }

    /// Whether the current key is `key`.
    pub fn is<S, K>(&self, record: &S, key: K) -> bool
    where
        S: AttributeStore + ?Sized,
        K: AsRef<str>,
    {
        self.get(record) == Some(key.as_ref())
    }

    /// Every declared key with its predicate result, in declared order.
    pub fn predicates<S: AttributeStore + ?Sized>(&self, record: &S) -> Vec<(&str, bool)> {
        let current = self.get(record);
        self.mapping
            .keys()
            .map(|key| (key, Some(key) == current))
            .collect()
    }

    /// Localized label of the current key, `None` when there is no current key.
    pub fn human<S, L>(&self, record: &S, labels: &L) -> Option<String>
    where
        S: AttributeStore + ?Sized,
        L: LabelResolver + ?Sized,
    {
        self.get(record).map(|key| self.label_for(key, labels))
    }

    /// Validation rule implied by the policy, `None` when disabled.
    pub fn inclusion_rule(&self) -> Option<InclusionRule> {
        self.validation.is_enabled().then(|| InclusionRule {
            attribute: self.name.clone(),
            allowed: self.mapping.raw_values().collect(),
            allow_nil: self.validation == ValidationPolicy::AllowNil,
        })
    }

    fn label_for<L: LabelResolver + ?Sized>(&self, key: &str, labels: &L) -> String {
        labels
            .lookup(&labels::value_key(&self.model, &self.name, key))
            .unwrap_or_else(|| labels::humanize(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::definition::EnumDefinition;
    use crate::labels::{NoLabels, StaticLabels};
    use crate::store::{MemoryTable, Record};
    use pretty_assertions::assert_eq;

    fn gender(validation: ValidationPolicy) -> EnumAttribute {
        let mapping = CanonicalMapping::resolve(
            "gender",
            &EnumDefinition::list(["female", "male"]),
            &Configuration::default(),
        )
        .unwrap();
        EnumAttribute::new("user", "gender", mapping, validation)
    }

    #[test]
    fn test_get_reads_key() {
        let attr = gender(ValidationPolicy::Enabled);
        assert_eq!(attr.get(&Record::new().with("gender", 1)), Some("male"));
        assert_eq!(attr.get(&Record::new()), None);
    }

    #[test]
    fn test_get_unknown_raw_is_none() {
        let attr = gender(ValidationPolicy::Enabled);
        let record = Record::new().with("gender", 42);
        assert_eq!(attr.get(&record), None);
        assert_eq!(attr.raw(&record), Some(42));
    }

    crate::enum_keys! {
        enum Gender {
            Female => "female",
            Male => "male",
        }
    }

    #[test]
    fn test_get_as_typed_key() {
        let attr = gender(ValidationPolicy::Enabled);
        assert_eq!(
            attr.get_as::<Gender>(&Record::new().with("gender", 1)),
            Some(Gender::Male)
        );
        assert_eq!(attr.get_as::<Gender>(&Record::new().with("gender", 9)), None);
    }

    #[test]
    fn test_set_round_trip() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut record = Record::new();
        for (key, raw) in attr.values().iter() {
            attr.set(&mut record, key);
            assert_eq!(attr.get(&record), Some(key));
            assert_eq!(attr.raw(&record), Some(raw));
        }
    }

    #[test]
    fn test_set_unknown_key_unsets() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut record = Record::new().with("gender", 1);
        attr.set(&mut record, "bogus");
        assert_eq!(attr.get(&record), None);
        assert_eq!(attr.raw(&record), None);
    }

    #[test]
    fn test_set_none_unsets() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut record = Record::new().with("gender", 1);
        attr.set(&mut record, None::<&str>);
        assert_eq!(attr.raw(&record), None);
    }

    #[test]
    fn test_set_raw_value() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut record = Record::new();
        attr.set(&mut record, 1);
        assert_eq!(attr.get(&record), Some("male"));

        attr.set(&mut record, 9);
        assert_eq!(attr.raw(&record), None);
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut record = Record::new();
        attr.set(&mut record, "female");

        assert!(attr.is(&record, "female"));
        assert!(!attr.is(&record, "male"));
        assert!(!attr.is(&record, "unknown"));
        assert_eq!(
            attr.predicates(&record),
            vec![("female", true), ("male", false)]
        );
    }

    #[test]
    fn test_human_values_fall_back_to_humanized_keys() {
        let attr = gender(ValidationPolicy::Enabled);
        let human = attr.human_values(&NoLabels);
        assert_eq!(
            human.iter().collect::<Vec<_>>(),
            vec![("female", "Female"), ("male", "Male")]
        );
    }

    #[test]
    fn test_human_uses_translations() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut labels = StaticLabels::new("ja");
        labels.insert("ja", "enum_accessor.user.gender.female", "女");

        let record = Record::new().with("gender", 0);
        assert_eq!(attr.human(&record, &labels).as_deref(), Some("女"));
        assert_eq!(attr.human_values(&labels).get("male"), Some("Male"));
        assert_eq!(attr.human(&Record::new(), &labels), None);
    }

    #[test]
    fn test_human_attribute_name() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut labels = StaticLabels::new("ja");
        assert_eq!(attr.human_attribute_name(&labels), "Gender");
        labels.insert("ja", "attributes.user.gender", "性別");
        assert_eq!(attr.human_attribute_name(&labels), "性別");
    }

    #[test]
    fn test_where_in_skips_unknown_keys() {
        let attr = gender(ValidationPolicy::Enabled);
        let mut table = MemoryTable::new();
        table.insert(Record::new().with("gender", 0));
        table.insert(Record::new().with("gender", 1));

        assert_eq!(attr.where_in(&table, &["female"]).count(), 1);
        assert_eq!(attr.where_in(&table, &["female", "male", "bogus"]).count(), 2);
        assert_eq!(attr.where_in(&table, &["bogus"]).count(), 0);
    }

    #[test]
    fn test_inclusion_rule() {
        let rule = gender(ValidationPolicy::Enabled).inclusion_rule().unwrap();
        assert_eq!(rule.allowed, vec![0, 1]);
        assert!(!rule.allow_nil);

        let rule = gender(ValidationPolicy::AllowNil).inclusion_rule().unwrap();
        assert!(rule.allow_nil);

        assert!(gender(ValidationPolicy::Disabled).inclusion_rule().is_none());
    }
}
