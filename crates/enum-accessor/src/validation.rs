//! Validation wiring.
//!
//! Declaring an enum attribute registers an [`InclusionRule`] with a
//! [`ValidationRegistry`] unless validation is disabled. The registry is an
//! injected capability; [`Validations`] is the in-memory one.
//!
//! | Policy | Unset | Mapped | Unmapped |
//! |--------|-------|--------|----------|
//! | `Enabled` | invalid | valid | invalid |
//! | `AllowNil` | valid | valid | invalid |
//! | `Disabled` | valid | valid | valid |
//!
//! Writing an unknown key stores an unset value, so under `AllowNil` it passes.
//! Unmapped raw values only reach validation when written to storage directly.

use crate::store::AttributeStore;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Whether and how an enum attribute takes part in record validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Value must be one of the declared keys.
    #[default]
    Enabled,

    /// Value must be one of the declared keys, or unset.
    AllowNil,

    /// No rule is registered.
    Disabled,
}

impl ValidationPolicy {
    pub fn is_enabled(self) -> bool {
        !matches!(self, ValidationPolicy::Disabled)
    }
}

/// Accepts `true`, `false` or `{ "allow_nil": bool }`.
impl<'de> Deserialize<'de> for ValidationPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Options {
            #[serde(default)]
            allow_nil: bool,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Flag(bool),
            Options(Options),
        }

        match Helper::deserialize(deserializer) {
            Ok(Helper::Flag(true)) => Ok(ValidationPolicy::Enabled),
            Ok(Helper::Flag(false)) => Ok(ValidationPolicy::Disabled),
            Ok(Helper::Options(Options { allow_nil: true })) => Ok(ValidationPolicy::AllowNil),
            Ok(Helper::Options(Options { allow_nil: false })) => Ok(ValidationPolicy::Enabled),
            Err(_) => Err(de::Error::custom(
                "expected true, false or { \"allow_nil\": bool }",
            )),
        }
    }
}

/// "Raw value must be one of these" rule for one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionRule {
    pub attribute: String,
    pub allowed: Vec<i64>,
    pub allow_nil: bool,
}

impl InclusionRule {
    pub fn check(&self, raw: Option<i64>) -> Result<(), ValidationError> {
        let ok = match raw {
            None => self.allow_nil,
            Some(value) => self.allowed.contains(&value),
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError {
                attribute: self.attribute.clone(),
                message: "is not included in the list".to_string(),
            })
        }
    }
}

/// Registration surface of a record validation framework.
pub trait ValidationRegistry {
    fn register_inclusion(&mut self, rule: InclusionRule);

    /// Drop the rule registered for `attribute`, if any.
    fn unregister(&mut self, _attribute: &str) {}
}

/// A single failed rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{attribute} {message}")]
pub struct ValidationError {
    pub attribute: String,
    pub message: String,
}

/// Every failed rule of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Errors reported for `attribute`.
    pub fn on<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.attribute == attribute)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// In-memory rule registry.
///
/// Registering a rule for an attribute that already has one replaces it.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    rules: Vec<InclusionRule>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[InclusionRule] {
        &self.rules
    }

    pub fn rule_for(&self, attribute: &str) -> Option<&InclusionRule> {
        self.rules.iter().find(|rule| rule.attribute == attribute)
    }

    /// Run every rule against `record`.
    pub fn validate<S: AttributeStore + ?Sized>(&self, record: &S) -> Result<(), ValidationErrors> {
        let errors: Vec<ValidationError> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(record.read_attribute(&rule.attribute)).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn is_valid<S: AttributeStore + ?Sized>(&self, record: &S) -> bool {
        self.validate(record).is_ok()
    }
}

impl ValidationRegistry for Validations {
    fn register_inclusion(&mut self, rule: InclusionRule) {
        self.unregister(&rule.attribute);
        self.rules.push(rule);
    }

    fn unregister(&mut self, attribute: &str) {
        self.rules.retain(|existing| existing.attribute != attribute);
    }
}
