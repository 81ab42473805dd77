//! # Enum Accessor Architecture
//!
//! Enum Accessor puts a **symbolic enum layer** on top of model attributes that are
//! stored as raw integers. Storage keeps the integer; callers work with names,
//! predicates, localized labels and query scopes derived from one mapping.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Declaration (declare.rs)                                   │
//! │  - declare_enum / EnumAccessor: definition → binding        │
//! │  - Wires the inclusion rule into a ValidationRegistry       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binding (attribute.rs)                                     │
//! │  - EnumAttribute: readers, writer, predicates, labels,      │
//! │    scopes, all parameterized by one CanonicalMapping        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Mapping (definition.rs, mapping.rs, config.rs)             │
//! │  - EnumDefinition → CanonicalMapping, offset by StartIndex  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators (store.rs, validation.rs, labels.rs)         │
//! │  - AttributeStore, QueryBuilder, ValidationRegistry,        │
//! │    LabelResolver, with in-memory implementations            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail Fast, Then Fail Soft
//!
//! Declaration fails on duplicate keys, duplicate raw values or an empty
//! definition, and nothing is registered. After that, nothing fails: unknown raw
//! values read as `None`, unknown keys are written as unset, out-of-range start
//! indexes become `0`. Those states show up only through validation.
//!
//! ## Example
//!
//! ```
//! use enum_accessor::{EnumAccessor, EnumDefinition, EnumOptions, MemoryTable, NoLabels};
//!
//! let mut user = EnumAccessor::new("user");
//! user.declare("gender", EnumDefinition::explicit([("female", 100), ("male", 200)]), EnumOptions::default())
//!     .unwrap();
//! let gender = user.attribute("gender").unwrap();
//!
//! let table = MemoryTable::new();
//! let mut record = table.build();
//! gender.set(&mut record, "female");
//!
//! assert!(gender.is(&record, "female"));
//! assert_eq!(gender.raw(&record), Some(100));
//! assert_eq!(gender.human(&record, &NoLabels).as_deref(), Some("Female"));
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: StartIndex policy, explicit and process-wide
//! - [`definition`]: Declarative enum definitions
//! - [`mapping`]: Canonical key ↔ raw value mapping
//! - [`attribute`]: Per-attribute accessors
//! - [`declare`]: Declaration entry points
//! - [`keys`]: Compile-time key enums
//! - [`labels`]: Localization lookup and humanization
//! - [`validation`]: Inclusion rules and the registry interface
//! - [`store`]: Attribute storage and query interfaces
//! - [`error`]: Error types

pub mod attribute;
pub mod config;
pub mod declare;
pub mod definition;
pub mod error;
pub mod keys;
pub mod labels;
pub mod mapping;
pub mod store;
pub mod validation;

pub use attribute::{EnumAttribute, EnumInput, HumanValues};
pub use config::{configuration, configure, Configuration, StartIndex};
pub use declare::{declare_enum, EnumAccessor, EnumOptions};
pub use definition::EnumDefinition;
pub use error::{EnumError, Result};
pub use keys::SymbolicKey;
pub use labels::{humanize, LabelResolver, NoLabels, StaticLabels};
pub use mapping::CanonicalMapping;
pub use store::{AttributeStore, MemoryTable, QueryBuilder, Record, Relation};
pub use validation::{
    InclusionRule, ValidationError, ValidationErrors, ValidationPolicy, ValidationRegistry,
    Validations,
};
