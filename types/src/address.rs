//! Classic account address type.

use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The base58 alphabet used by the ledger (differs from Bitcoin's ordering).
pub const ALPHABET: &str = "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// A classic account address, always prefixed with `r`.
///
/// Addresses are base58 and therefore case-sensitive; no normalisation is
/// applied. Checksum verification belongs to the key/address service.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(Cow<'static, str>);

impl Address {
    /// The standard prefix for all classic addresses.
    pub const PREFIX: char = 'r';
    pub const MIN_LEN: usize = 25;
    pub const MAX_LEN: usize = 35;

    /// Account whose public key is all zero bytes. Pseudo-transactions are
    /// attributed to it.
    pub const ACCOUNT_ZERO: Self = Self(Cow::Borrowed("rrrrrrrrrrrrrrrrrrrrrhoLvTp"));

    /// The genesis account created with the first ledger.
    pub const GENESIS: Self = Self(Cow::Borrowed("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));

    /// Validate and wrap a classic address string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        Self::check(&s)?;
        Ok(Self(Cow::Owned(s)))
    }

    fn check(s: &str) -> Result<(), TypesError> {
        let fail = |reason| TypesError::InvalidAddress {
            address: s.to_string(),
            reason,
        };
        if !s.starts_with(Self::PREFIX) {
            return Err(fail("must start with 'r'"));
        }
        if s.len() < Self::MIN_LEN || s.len() > Self::MAX_LEN {
            return Err(fail("length must be between 25 and 35 characters"));
        }
        if !s.chars().all(|c| ALPHABET.contains(c)) {
            return Err(fail("contains a character outside the base58 alphabet"));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
