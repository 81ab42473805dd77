//! # Configuration
//!
//! The only policy this crate carries is the **start index**: the raw value given
//! to the first key when an enum is declared as a plain ordered list.
//!
//! ## Explicit vs. Process-wide
//!
//! A [`Configuration`] is a plain `Copy` value. Declarations take one explicitly
//! (see [`crate::declare::EnumAccessor::with_config`]), which is the preferred way
//! to build mappings.
//!
//! For code that declares models without threading a value through, a process-wide
//! configuration lives behind [`configuration`] and [`configure`]. It is read once,
//! when a mapping is built. Changing it later never touches mappings that already
//! exist. Declarations are expected to happen during startup, before any
//! concurrent work begins.
//!
//! ## Layered Loading
//!
//! [`Configuration::load`] resolves the start index in priority order:
//! 1. **Environment**: `ENUM_ACCESSOR_START_INDEX`
//! 2. **File**: an optional TOML file with a `start_index` key
//! 3. **Compiled Default**: `0`
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `start_index` | `0` | Raw value of the first key of a list definition (`0` or `1`) |

use crate::error::Result;
use confique::Config;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

/// Offset applied to list positions when deriving raw values.
///
/// Only two states exist. Every input is coerced to its integer form and
/// anything other than exactly `1` collapses to [`StartIndex::Zero`]; nothing
/// here ever fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum StartIndex {
    #[default]
    Zero,
    One,
}

impl StartIndex {
    /// The integer added to a key's list position.
    pub fn offset(self) -> i64 {
        match self {
            StartIndex::Zero => 0,
            StartIndex::One => 1,
        }
    }
}

impl fmt::Display for StartIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset())
    }
}

impl From<StartIndex> for i64 {
    fn from(index: StartIndex) -> Self {
        index.offset()
    }
}

impl From<i64> for StartIndex {
    fn from(value: i64) -> Self {
        if value == 1 {
            StartIndex::One
        } else {
            StartIndex::Zero
        }
    }
}

impl From<i32> for StartIndex {
    fn from(value: i32) -> Self {
        i64::from(value).into()
    }
}

impl From<u32> for StartIndex {
    fn from(value: u32) -> Self {
        i64::from(value).into()
    }
}

impl From<usize> for StartIndex {
    fn from(value: usize) -> Self {
        i64::try_from(value).unwrap_or(0).into()
    }
}

impl From<f64> for StartIndex {
    /// Truncates toward zero, so `1.9` is `One` and `0.9` is `Zero`.
    fn from(value: f64) -> Self {
        if value.is_finite() && value.trunc() == 1.0 {
            StartIndex::One
        } else {
            StartIndex::Zero
        }
    }
}

impl From<&str> for StartIndex {
    fn from(value: &str) -> Self {
        leading_integer(value).into()
    }
}

impl From<String> for StartIndex {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl<T: Into<StartIndex>> From<Option<T>> for StartIndex {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Integer form of a string: optional sign and the digits that follow it.
///
/// Parsing stops at the first non-digit. Input with no leading digits is `0`,
/// as is input that overflows.
fn leading_integer(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let magnitude = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Configuration for enum declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub start_index: StartIndex,
}

/// Raw configuration layers, before start index normalization.
#[derive(Config, Debug)]
struct ConfigLayers {
    /// Raw value of the first key of a list definition.
    #[config(env = "ENUM_ACCESSOR_START_INDEX", default = 0)]
    start_index: i64,
}

impl Configuration {
    pub fn new(start_index: impl Into<StartIndex>) -> Self {
        Self {
            start_index: start_index.into(),
        }
    }

    /// Current start index.
    pub fn get(&self) -> StartIndex {
        self.start_index
    }

    /// Store the start index, coercing `value` to `0` unless its integer form is exactly `1`.
    pub fn set(&mut self, value: impl Into<StartIndex>) {
        self.start_index = value.into();
    }

    /// Resolve the configuration from the environment, an optional TOML file and defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLayers::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let layers = builder.load()?;

        let config = Self::new(layers.start_index);
        if config.start_index.offset() != layers.start_index {
            tracing::debug!(
                requested = layers.start_index,
                applied = %config.start_index,
                "start index out of range, using default"
            );
        }
        Ok(config)
    }
}

static GLOBAL: Lazy<RwLock<Configuration>> = Lazy::new(|| RwLock::new(Configuration::default()));

/// Snapshot of the process-wide configuration.
pub fn configuration() -> Configuration {
    *GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

/// Mutate the process-wide configuration.
///
/// Only affects mappings built after the call returns.
pub fn configure<F>(f: F)
where
    F: FnOnce(&mut Configuration),
{
    let mut config = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    let before = config.start_index;
    f(&mut config);
    if before != config.start_index {
        tracing::debug!(from = %before, to = %config.start_index, "start index changed");
    }
}
