//! Helpers shared by every wire-mapped struct.

use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Fields this version of the model does not recognise, kept in arrival
/// order and re-emitted untouched on the next serialization.
pub type UnknownFields = Map<String, Value>;

/// Booleans the wire encodes as the integers `0` / `1`.
pub mod bool_as_int {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(u64::from(other)),
                &"0 or 1",
            )),
        }
    }
}

/// `skip_serializing_if` helper for the always-present integer flag fields.
pub fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

macro_rules! uint64_text {
    ($(#[$meta:meta])* $name:ident, $radix:literal, $fmt:literal) => {
        $(#[$meta])*
        ///
        /// The original text is kept so that re-serialization reproduces the
        /// input byte for byte (zero padding included).
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            text: String,
            value: u64,
        }

        impl $name {
            pub fn new(text: impl Into<String>) -> Result<Self, TypesError> {
                let text = text.into();
                let value = (!text.is_empty() && text.len() <= 20)
                    .then(|| u64::from_str_radix(&text, $radix).ok())
                    .flatten()
                    .filter(|_| !text.starts_with('+'))
                    .ok_or_else(|| TypesError::InvalidUInt64(text.clone()))?;
                Ok(Self { text, value })
            }

            pub fn value(&self) -> u64 {
                self.value
            }

            pub fn as_str(&self) -> &str {
                &self.text
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self {
                    text: format!($fmt, value),
                    value,
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.text)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.text)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

uint64_text!(
    /// A 64-bit field rendered as a hex string (`OwnerNode`, `XChainClaimID`).
    HexU64,
    16,
    "{:X}"
);

uint64_text!(
    /// A 64-bit field rendered as a decimal string (MPT amounts and caps).
    DecimalU64,
    10,
    "{}"
);
