//! # Declaring Enum Attributes
//!
//! [`declare_enum`] is the single entry point that turns a definition into an
//! [`EnumAttribute`]:
//!
//! 1. Resolve the definition into a [`CanonicalMapping`] with the given configuration.
//! 2. Register an inclusion rule with the validation registry. When validation is
//!    disabled, drop any rule an earlier declaration of the attribute left behind.
//! 3. Return the attribute binding.
//!
//! A definition that fails to resolve aborts before anything is registered.
//!
//! [`EnumAccessor`] groups the attributes of one model type and owns its validation
//! registry. Each declaration reads the process-wide configuration at the time it
//! runs, unless the model was pinned to one with [`EnumAccessor::with_config`].
//!
//! ```
//! use enum_accessor::{Configuration, EnumAccessor, EnumOptions, Record};
//!
//! let mut user = EnumAccessor::new("user").with_config(Configuration::new(0));
//! user.declare("gender", ["female", "male"], EnumOptions::default()).unwrap();
//!
//! let gender = user.attribute("gender").unwrap();
//! let mut record = Record::new();
//! gender.set(&mut record, "male");
//! assert_eq!(gender.get(&record), Some("male"));
//! assert_eq!(gender.raw(&record), Some(1));
//! assert!(user.validate(&record).is_ok());
//! ```

use crate::attribute::EnumAttribute;
use crate::config::{self, Configuration};
use crate::definition::EnumDefinition;
use crate::error::Result;
use crate::mapping::CanonicalMapping;
use crate::store::AttributeStore;
use crate::validation::{ValidationErrors, ValidationPolicy, ValidationRegistry, Validations};
use indexmap::IndexMap;
use serde::Deserialize;

/// Declaration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct EnumOptions {
    /// `true` (default), `false` or `{ "allow_nil": true }`.
    #[serde(default)]
    pub validates: ValidationPolicy,
}

impl EnumOptions {
    pub fn validates(policy: ValidationPolicy) -> Self {
        Self { validates: policy }
    }

    /// Parse options from JSON, e.g. `{"validates": {"allow_nil": true}}`.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Resolve `definition` and wire its validation into `registry`.
pub fn declare_enum<R>(
    model: &str,
    attribute: &str,
    definition: &EnumDefinition,
    options: EnumOptions,
    config: &Configuration,
    registry: &mut R,
) -> Result<EnumAttribute>
where
    R: ValidationRegistry + ?Sized,
{
    let mapping = CanonicalMapping::resolve(attribute, definition, config)?;
    let binding = EnumAttribute::new(model, attribute, mapping, options.validates);

    match binding.inclusion_rule() {
        Some(rule) => registry.register_inclusion(rule),
        None => registry.unregister(attribute),
    }

    tracing::debug!(
        model,
        attribute,
        keys = binding.values().len(),
        start_index = %config.get(),
        validates = ?options.validates,
        "declared enum attribute"
    );

    Ok(binding)
}

/// Enum attributes of one model type.
#[derive(Debug, Clone)]
pub struct EnumAccessor<R = Validations> {
    model: String,
    config: Option<Configuration>,
    registry: R,
    attributes: IndexMap<String, EnumAttribute>,
}

impl EnumAccessor<Validations> {
    /// Model with its own in-memory validation registry.
    pub fn new(model: &str) -> Self {
        Self::with_registry(model, Validations::new())
    }

    /// Run every registered rule against `record`.
    pub fn validate<S: AttributeStore + ?Sized>(
        &self,
        record: &S,
    ) -> std::result::Result<(), ValidationErrors> {
        self.registry.validate(record)
    }

    pub fn is_valid<S: AttributeStore + ?Sized>(&self, record: &S) -> bool {
        self.registry.is_valid(record)
    }
}

impl<R: ValidationRegistry> EnumAccessor<R> {
    /// Model backed by an external validation registry.
    ///
    /// Declarations read the process-wide configuration unless
    /// [`EnumAccessor::with_config`] pins one.
    pub fn with_registry(model: &str, registry: R) -> Self {
        Self {
            model: model.to_string(),
            config: None,
            registry,
            attributes: IndexMap::new(),
        }
    }

    /// Use `config` for every later declaration instead of the process-wide one.
    pub fn with_config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }

    /// Declare an enum attribute on this model.
    ///
    /// Redeclaring an attribute replaces the earlier binding.
    pub fn declare(
        &mut self,
        attribute: &str,
        definition: impl Into<EnumDefinition>,
        options: EnumOptions,
    ) -> Result<&EnumAttribute> {
        let definition = definition.into();
        let config = self.config();
        let binding = declare_enum(
            &self.model,
            attribute,
            &definition,
            options,
            &config,
            &mut self.registry,
        )?;

        let (index, _) = self.attributes.insert_full(attribute.to_string(), binding);
        Ok(&self.attributes[index])
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configuration the next declaration will use.
    pub fn config(&self) -> Configuration {
        self.config.unwrap_or_else(config::configuration)
    }

    pub fn attribute(&self, name: &str) -> Option<&EnumAttribute> {
        self.attributes.get(name)
    }

    /// Declared attributes, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &EnumAttribute> {
        self.attributes.values()
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}
