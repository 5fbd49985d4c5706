//! Fixed-width hex identifiers: ledger hashes, currency codes, issuance ids.
//!
//! Hex is case-insensitive: the text is kept as supplied for re-encoding,
//! and equality, ordering and hashing work on the decoded bytes.

use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

macro_rules! fixed_hex {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $bytes:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            text: String,
            bytes: [u8; $bytes],
        }

        impl $name {
            /// Width of the identifier in bytes.
            pub const BYTES: usize = $bytes;

            pub fn new(raw: impl AsRef<str>) -> Result<Self, TypesError> {
                let raw = raw.as_ref();
                let invalid = || TypesError::InvalidHash {
                    kind: $kind,
                    expected: $bytes * 2,
                    actual: raw.to_string(),
                };
                if raw.len() != $bytes * 2 {
                    return Err(invalid());
                }
                let mut bytes = [0u8; $bytes];
                hex::decode_to_slice(raw, &mut bytes).map_err(|_| invalid())?;
                Ok(Self {
                    text: raw.to_string(),
                    bytes,
                })
            }

            pub fn from_bytes(bytes: [u8; $bytes]) -> Self {
                Self {
                    text: hex::encode_upper(bytes),
                    bytes,
                }
            }

            pub fn as_str(&self) -> &str {
                &self.text
            }

            pub fn to_bytes(&self) -> [u8; $bytes] {
                self.bytes
            }

            pub fn is_zero(&self) -> bool {
                self.bytes == [0u8; $bytes]
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.bytes == other.bytes
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.bytes.cmp(&other.bytes)
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.bytes.hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.text[..8])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.text)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
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

fixed_hex!(
    /// A 256-bit digest: transaction ids, ledger entry indexes, NFToken ids.
    Hash256,
    "256-bit hash",
    32
);

fixed_hex!(
    /// A 128-bit value (account email hashes).
    Hash128,
    "128-bit hash",
    16
);

fixed_hex!(
    /// A 160-bit value (non-standard currency codes).
    Hash160,
    "160-bit hash",
    20
);

fixed_hex!(
    /// A 192-bit multi-purpose token issuance identifier.
    MptIssuanceId,
    "MPT issuance id",
    24
);

#[cfg(test)]
mod tests {
    use super::*;

    const TX_ID: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

    #[test]
    fn hash256_compares_case_insensitively() {
        let lower = Hash256::new(TX_ID.to_lowercase()).unwrap();
        let upper = Hash256::new(TX_ID).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_bytes(), upper.to_bytes());
    }

    #[test]
    fn hash256_keeps_original_text() {
        let lower = Hash256::new(TX_ID.to_lowercase()).unwrap();
        assert_eq!(lower.as_str(), TX_ID.to_lowercase());
        assert_eq!(
            serde_json::to_value(&lower).unwrap(),
            serde_json::json!(TX_ID.to_lowercase())
        );
    }

    #[test]
    fn hash256_rejects_wrong_length() {
        let err = Hash256::new(&TX_ID[..62]).unwrap_err();
        assert!(matches!(err, TypesError::InvalidHash { expected: 64, .. }));
    }

    #[test]
    fn hash256_rejects_non_hex() {
        let bad = format!("{}ZZ", &TX_ID[..62]);
        assert!(Hash256::new(bad).is_err());
    }

    #[test]
    fn from_bytes_is_zero() {
        assert!(Hash256::from_bytes([0u8; 32]).is_zero());
        assert!(!Hash256::from_bytes([1u8; 32]).is_zero());
        assert_eq!(Hash256::from_bytes([0xab; 32]).as_str(), "AB".repeat(32));
        assert_eq!(Hash256::from_bytes([0xab; 32]).to_bytes(), [0xab; 32]);
    }

    #[test]
    fn mpt_issuance_id_width() {
        assert!(MptIssuanceId::new("00000001A407AF5856CCF3C42619DAA925813FC955C72983").is_ok());
        assert!(MptIssuanceId::new(TX_ID).is_err());
    }
}
