//! Signing key material as carried by the transaction envelope.
//!
//! Key generation and signature verification live in the signing service;
//! this module only checks the shape of the hex values it hands us.

use crate::blob::HexBlob;
use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A 33-byte public key (secp256k1 compressed or `ED`-prefixed Ed25519),
/// or the empty multi-signing sentinel.
///
/// The hex text is kept as supplied; comparison ignores case.
#[derive(Clone)]
pub struct PublicKey(Cow<'static, str>);

impl PublicKey {
    /// Empty `SigningPubKey`: the transaction is multi-signed (see `Signers`)
    /// or is an inner transaction of a batch.
    pub const MULTI_SIGN: Self = Self(Cow::Borrowed(""));

    pub const HEX_LEN: usize = 66;

    pub fn new(raw: impl AsRef<str>) -> Result<Self, TypesError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Ok(Self::MULTI_SIGN);
        }
        if raw.len() != Self::HEX_LEN || hex::decode(raw).is_err() {
            return Err(TypesError::InvalidPublicKey(format!(
                "expected {} hex characters, got {raw:?}",
                Self::HEX_LEN
            )));
        }
        let prefix = raw[..2].to_ascii_uppercase();
        if !matches!(prefix.as_str(), "02" | "03" | "ED") {
            return Err(TypesError::InvalidPublicKey(format!(
                "unknown key type prefix {prefix:?}"
            )));
        }
        Ok(Self(Cow::Owned(raw.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_multi_sign(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_ed25519(&self) -> bool {
        self.0.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("ED"))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_uppercase());
        }
        state.write_usize(self.0.len());
    }
}

impl Default for PublicKey {
    fn default() -> Self {
        Self::MULTI_SIGN
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multi_sign() {
            f.write_str("PublicKey(<multi-sign>)")
        } else {
            write!(f, "PublicKey({})", self.0)
        }
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// A DER (secp256k1) or raw (Ed25519) signature, hex-encoded.
pub type Signature = HexBlob;

#[cfg(test)]
mod tests {
    use super::*;

    const ED_KEY: &str = "ED5F5AC8B98974A3CA843326D9B88CEBD0560177B973EE0B149F782CFAA06DC66A";

    #[test]
    fn empty_string_is_the_multi_sign_sentinel() {
        let key = PublicKey::new("").unwrap();
        assert!(key.is_multi_sign());
        assert_eq!(key, PublicKey::MULTI_SIGN);
    }

    #[test]
    fn accepts_ed25519_key() {
        let key = PublicKey::new(ED_KEY.to_lowercase()).unwrap();
        assert!(key.is_ed25519());
        assert_eq!(key.as_str(), ED_KEY.to_lowercase());
        assert_eq!(key, PublicKey::new(ED_KEY).unwrap());
    }

    #[test]
    fn rejects_unknown_prefix() {
        let bad = format!("04{}", &ED_KEY[2..]);
        assert!(PublicKey::new(bad).is_err());
    }

    #[test]
    fn rejects_short_key() {
        assert!(PublicKey::new(&ED_KEY[..64]).is_err());
    }
}
