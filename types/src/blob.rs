//! Variable-length hex blobs (memos, URIs, credential types, DID documents).

use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An even-length ASCII hex string.
///
/// The text is kept exactly as supplied so it re-encodes unchanged; equality,
/// ordering and hashing work on the decoded bytes, so case does not matter.
#[derive(Clone, Default)]
pub struct HexBlob {
    text: String,
    bytes: Vec<u8>,
}

impl HexBlob {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TypesError> {
        let raw = raw.as_ref();
        let bytes =
            hex::decode(raw).map_err(|e| TypesError::InvalidHex(format!("{raw:?}: {e}")))?;
        Ok(Self {
            text: raw.to_string(),
            bytes,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            text: hex::encode_upper(bytes),
            bytes: bytes.to_vec(),
        }
    }

    /// Hex-encode a UTF-8 string, as wallets do for memo text and URIs.
    pub fn from_utf8(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length of the decoded payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl PartialEq for HexBlob {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for HexBlob {}

impl PartialOrd for HexBlob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexBlob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for HexBlob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Debug for HexBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBlob({})", self.text)
    }
}

impl fmt::Display for HexBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for HexBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for HexBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_odd_length() {
        assert!(matches!(HexBlob::new("ABC"), Err(TypesError::InvalidHex(_))));
    }

    #[test]
    fn utf8_round_trip() {
        let blob = HexBlob::from_utf8("ipfs://cid");
        assert_eq!(blob.byte_len(), 10);
        assert_eq!(blob.to_bytes(), b"ipfs://cid");
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(HexBlob::new("ZZ"), Err(TypesError::InvalidHex(_))));
    }

    #[test]
    fn keeps_original_case() {
        let lower = HexBlob::new("deadbeef").unwrap();
        assert_eq!(lower.as_str(), "deadbeef");
        assert_eq!(serde_json::to_value(&lower).unwrap(), serde_json::json!("deadbeef"));
        assert_eq!(lower.to_bytes(), [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn equality_and_hashing_ignore_case() {
        use std::collections::HashSet;

        let lower = HexBlob::new("deadbeef").unwrap();
        let upper = HexBlob::new("DEADBEEF").unwrap();
        assert_eq!(lower, upper);
        let set: HashSet<_> = [lower, upper].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
