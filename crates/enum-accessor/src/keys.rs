//! Compile-time key enums.
//!
//! String keys are enough to drive every accessor, but a Rust enum catches
//! typos at compile time. [`enum_keys!`](crate::enum_keys) generates one:
//!
//! ```
//! use enum_accessor::enum_keys;
//! use enum_accessor::keys::SymbolicKey;
//!
//! enum_keys! {
//!     pub enum Gender {
//!         Female => "female",
//!         Male => "male",
//!     }
//! }
//!
//! assert_eq!(Gender::Male.as_str(), "male");
//! assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
//! assert_eq!(Gender::ALL.len(), 2);
//! ```
//!
//! Generated enums implement `AsRef<str>`, so they are accepted anywhere a key
//! is, and convert into [`EnumInput`](crate::attribute::EnumInput) for writes.

use thiserror::Error;

/// A closed set of symbolic keys known at compile time.
pub trait SymbolicKey: Copy + 'static {
    /// Every key, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == key)
    }
}

/// Returned when parsing a string that names no key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown enum key '{0}'")]
pub struct UnknownKey(pub String);

/// Generate a [`SymbolicKey`] enum.
#[macro_export]
macro_rules! enum_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::keys::SymbolicKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                $crate::keys::SymbolicKey::as_str(self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::keys::SymbolicKey::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::keys::UnknownKey;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::keys::SymbolicKey>::from_key(s)
                    .ok_or_else(|| $crate::keys::UnknownKey(s.to_string()))
            }
        }

        impl ::std::convert::From<$name> for $crate::attribute::EnumInput {
            fn from(key: $name) -> Self {
                $crate::attribute::EnumInput::Key(
                    $crate::keys::SymbolicKey::as_str(&key).to_string(),
                )
            }
        }
    };
}
