//! Fulfillments: the reveal half of a crypto-condition.
//!
//! Decoding and re-encoding is byte-exact for every type so the raw hex
//! presented on the ledger can be compared against the typed value.

use crate::condition::{Condition, ConditionType};
use crate::der::{self, Reader};
use crate::error::CryptoError;
use crate::hash::sha256;
use std::collections::BTreeSet;

const ED25519_COST: u64 = 131_072;
const COMPOUND_BASE_COST: u64 = 1024;

/// Deepest prefix/threshold nesting accepted when decoding.
pub const MAX_NESTING: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fulfillment {
    PreimageSha256 {
        preimage: Vec<u8>,
    },
    PrefixSha256 {
        prefix: Vec<u8>,
        max_message_length: u64,
        subfulfillment: Box<Fulfillment>,
    },
    ThresholdSha256 {
        subfulfillments: Vec<Fulfillment>,
        subconditions: Vec<Condition>,
    },
    RsaSha256 {
        modulus: Vec<u8>,
        signature: Vec<u8>,
    },
    Ed25519Sha256 {
        public_key: [u8; 32],
        signature: [u8; 64],
    },
}

impl Fulfillment {
    pub fn preimage(preimage: impl Into<Vec<u8>>) -> Self {
        Self::PreimageSha256 {
            preimage: preimage.into(),
        }
    }

    pub fn kind(&self) -> ConditionType {
        match self {
            Self::PreimageSha256 { .. } => ConditionType::PreimageSha256,
            Self::PrefixSha256 { .. } => ConditionType::PrefixSha256,
            Self::ThresholdSha256 { .. } => ConditionType::ThresholdSha256,
            Self::RsaSha256 { .. } => ConditionType::RsaSha256,
            Self::Ed25519Sha256 { .. } => ConditionType::Ed25519Sha256,
        }
    }

    /// Decode exactly one fulfillment; trailing bytes are an error.
    pub fn from_der(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut reader = Reader::new(bytes);
        let fulfillment = Self::read(&mut reader, 0)?;
        reader.finish()?;
        Ok(fulfillment)
    }

    fn read(reader: &mut Reader<'_>, depth: usize) -> Result<Self, CryptoError> {
        if depth > MAX_NESTING {
            return Err(CryptoError::Der("fulfillment nesting too deep"));
        }
        let (tag, body) = reader.tlv()?;
        if tag & 0xE0 != 0xA0 {
            return Err(CryptoError::Der("fulfillment must be a constructed context tag"));
        }
        let kind = ConditionType::from_id(tag & 0x1F).ok_or(CryptoError::UnknownType(tag))?;
        let mut fields = Reader::new(body);

        let fulfillment = match kind {
            ConditionType::PreimageSha256 => Self::PreimageSha256 {
                preimage: fields.expect_tag(der::primitive(0))?.to_vec(),
            },
            ConditionType::PrefixSha256 => {
                let prefix = fields.expect_tag(der::primitive(0))?.to_vec();
                let max_message_length = der::decode_uint(fields.expect_tag(der::primitive(1))?)?;
                let mut inner = Reader::new(fields.expect_tag(der::constructed(2))?);
                let subfulfillment = Box::new(Self::read(&mut inner, depth + 1)?);
                inner.finish()?;
                Self::PrefixSha256 {
                    prefix,
                    max_message_length,
                    subfulfillment,
                }
            }
            ConditionType::ThresholdSha256 => {
                let mut subfulfillments = Vec::new();
                let mut set = Reader::new(fields.expect_tag(der::constructed(0))?);
                while !set.is_empty() {
                    subfulfillments.push(Self::read(&mut set, depth + 1)?);
                }
                let mut subconditions = Vec::new();
                let mut set = Reader::new(fields.expect_tag(der::constructed(1))?);
                while !set.is_empty() {
                    subconditions.push(Condition::read(&mut set)?);
                }
                Self::ThresholdSha256 {
                    subfulfillments,
                    subconditions,
                }
            }
            ConditionType::RsaSha256 => Self::RsaSha256 {
                modulus: fields.expect_tag(der::primitive(0))?.to_vec(),
                signature: fields.expect_tag(der::primitive(1))?.to_vec(),
            },
            ConditionType::Ed25519Sha256 => Self::Ed25519Sha256 {
                public_key: fields
                    .expect_tag(der::primitive(0))?
                    .try_into()
                    .map_err(|_| CryptoError::Der("ed25519 public key must be 32 bytes"))?,
                signature: fields
                    .expect_tag(der::primitive(1))?
                    .try_into()
                    .map_err(|_| CryptoError::Der("ed25519 signature must be 64 bytes"))?,
            },
        };
        fields.finish()?;
        Ok(fulfillment)
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::new();
        match self {
            Self::PreimageSha256 { preimage } => {
                der::write_tlv(&mut body, der::primitive(0), preimage);
            }
            Self::PrefixSha256 {
                prefix,
                max_message_length,
                subfulfillment,
            } => {
                der::write_tlv(&mut body, der::primitive(0), prefix);
                let max = der::encode_uint(*max_message_length);
                der::write_tlv(&mut body, der::primitive(1), &max);
                der::write_tlv(&mut body, der::constructed(2), &subfulfillment.to_der());
            }
            Self::ThresholdSha256 {
                subfulfillments,
                subconditions,
            } => {
                let fulfilled: Vec<u8> = subfulfillments.iter().flat_map(|f| f.to_der()).collect();
                let unfulfilled: Vec<u8> = subconditions.iter().flat_map(|c| c.to_der()).collect();
                der::write_tlv(&mut body, der::constructed(0), &fulfilled);
                der::write_tlv(&mut body, der::constructed(1), &unfulfilled);
            }
            Self::RsaSha256 { modulus, signature } => {
                der::write_tlv(&mut body, der::primitive(0), modulus);
                der::write_tlv(&mut body, der::primitive(1), signature);
            }
            Self::Ed25519Sha256 {
                public_key,
                signature,
            } => {
                der::write_tlv(&mut body, der::primitive(0), public_key);
                der::write_tlv(&mut body, der::primitive(1), signature);
            }
        }
        let mut out = Vec::with_capacity(body.len() + 4);
        der::write_tlv(&mut out, der::constructed(self.kind().id()), &body);
        out
    }

    /// The condition this fulfillment satisfies.
    pub fn derive_condition(&self) -> Condition {
        let kind = self.kind();
        match self {
            Self::PreimageSha256 { preimage } => Condition::new(
                kind,
                sha256(preimage),
                preimage.len() as u64,
                BTreeSet::new(),
            ),
            Self::PrefixSha256 {
                prefix,
                max_message_length,
                subfulfillment,
            } => {
                let sub = subfulfillment.derive_condition();
                let mut contents = Vec::new();
                der::write_tlv(&mut contents, der::primitive(0), prefix);
                let max = der::encode_uint(*max_message_length);
                der::write_tlv(&mut contents, der::primitive(1), &max);
                der::write_tlv(&mut contents, der::constructed(2), &sub.to_der());
                let cost =
                    prefix.len() as u64 + max_message_length + sub.cost() + COMPOUND_BASE_COST;
                Condition::new(kind, fingerprint_of(&contents), cost, subtypes_of(kind, [&sub]))
            }
            Self::ThresholdSha256 {
                subfulfillments,
                subconditions,
            } => {
                let threshold = subfulfillments.len();
                let mut all: Vec<Condition> =
                    subfulfillments.iter().map(Self::derive_condition).collect();
                all.extend(subconditions.iter().cloned());

                let mut costs: Vec<u64> = all.iter().map(Condition::cost).collect();
                costs.sort_unstable_by(|a, b| b.cmp(a));
                let cost = costs.iter().take(threshold).sum::<u64>()
                    + COMPOUND_BASE_COST * all.len() as u64;

                // SET OF is ordered by encoding in DER.
                let mut encoded: Vec<Vec<u8>> = all.iter().map(Condition::to_der).collect();
                encoded.sort();
                let mut contents = Vec::new();
                let count = der::encode_uint(threshold as u64);
                der::write_tlv(&mut contents, der::primitive(0), &count);
                der::write_tlv(&mut contents, der::constructed(1), &encoded.concat());
                Condition::new(kind, fingerprint_of(&contents), cost, subtypes_of(kind, all.iter()))
            }
            Self::RsaSha256 { modulus, .. } => {
                let mut contents = Vec::new();
                der::write_tlv(&mut contents, der::primitive(0), modulus);
                let cost = (modulus.len() as u64).pow(2);
                Condition::new(kind, fingerprint_of(&contents), cost, BTreeSet::new())
            }
            Self::Ed25519Sha256 { public_key, .. } => {
                let mut contents = Vec::new();
                der::write_tlv(&mut contents, der::primitive(0), public_key);
                Condition::new(kind, fingerprint_of(&contents), ED25519_COST, BTreeSet::new())
            }
        }
    }
}

fn fingerprint_of(contents: &[u8]) -> [u8; 32] {
    let mut sequence = Vec::with_capacity(contents.len() + 4);
    der::write_tlv(&mut sequence, der::SEQUENCE, contents);
    sha256(&sequence)
}

/// Types of the subconditions and everything beneath them, minus `own`.
fn subtypes_of<'a>(
    own: ConditionType,
    subs: impl IntoIterator<Item = &'a Condition>,
) -> BTreeSet<ConditionType> {
    let mut types = BTreeSet::new();
    for sub in subs {
        types.insert(sub.kind());
        types.extend(sub.subtypes().iter().copied());
    }
    types.remove(&own);
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn empty_preimage_vector() {
        let fulfillment = Fulfillment::from_der(&unhex("A0028000")).unwrap();
        assert_eq!(fulfillment, Fulfillment::preimage(Vec::new()));
        let condition = fulfillment.derive_condition();
        assert_eq!(
            condition.to_der(),
            unhex("A0258020E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855810100")
        );
    }

    #[test]
    fn preimage_cost_is_length() {
        let fulfillment = Fulfillment::preimage(vec![0x42; 32]);
        assert_eq!(fulfillment.derive_condition().cost(), 32);
        assert_eq!(Fulfillment::from_der(&fulfillment.to_der()).unwrap(), fulfillment);
    }

    #[test]
    fn prefix_wraps_subfulfillment() {
        let fulfillment = Fulfillment::PrefixSha256 {
            prefix: b"memo".to_vec(),
            max_message_length: 16,
            subfulfillment: Box::new(Fulfillment::preimage(b"secret".to_vec())),
        };
        let decoded = Fulfillment::from_der(&fulfillment.to_der()).unwrap();
        assert_eq!(decoded, fulfillment);

        let condition = fulfillment.derive_condition();
        assert_eq!(condition.kind(), ConditionType::PrefixSha256);
        assert_eq!(condition.cost(), 4 + 16 + 6 + 1024);
        assert!(condition.subtypes().contains(&ConditionType::PreimageSha256));
    }

    #[test]
    fn threshold_cost_takes_largest() {
        let fulfillment = Fulfillment::ThresholdSha256 {
            subfulfillments: vec![Fulfillment::preimage(vec![1; 10])],
            subconditions: vec![Fulfillment::preimage(vec![2; 50]).derive_condition()],
        };
        let condition = fulfillment.derive_condition();
        // Threshold 1: the single most expensive of {10, 50}, plus 1024 per subcondition.
        assert_eq!(condition.cost(), 50 + 2 * 1024);
        assert_eq!(Fulfillment::from_der(&fulfillment.to_der()).unwrap(), fulfillment);
    }

    #[test]
    fn ed25519_round_trip() {
        let fulfillment = Fulfillment::Ed25519Sha256 {
            public_key: [3u8; 32],
            signature: [4u8; 64],
        };
        assert_eq!(Fulfillment::from_der(&fulfillment.to_der()).unwrap(), fulfillment);
        assert_eq!(fulfillment.derive_condition().cost(), 131_072);
    }

    /// `levels` PREFIX-SHA-256 wrappers around a preimage, built iteratively.
    fn nested_prefix(levels: usize) -> Vec<u8> {
        let mut encoded = Fulfillment::preimage(b"x".to_vec()).to_der();
        for _ in 0..levels {
            let mut body = Vec::new();
            der::write_tlv(&mut body, der::primitive(0), &[]);
            der::write_tlv(&mut body, der::primitive(1), &der::encode_uint(0));
            der::write_tlv(&mut body, der::constructed(2), &encoded);
            encoded.clear();
            der::write_tlv(&mut encoded, der::constructed(1), &body);
        }
        encoded
    }

    #[test]
    fn nesting_up_to_the_limit_decodes() {
        let encoded = nested_prefix(MAX_NESTING);
        let fulfillment = Fulfillment::from_der(&encoded).unwrap();
        assert_eq!(fulfillment.kind(), ConditionType::PrefixSha256);
        assert_eq!(fulfillment.to_der(), encoded);
    }

    #[test]
    fn nesting_past_the_limit_is_rejected() {
        let too_deep = CryptoError::Der("fulfillment nesting too deep");
        let one_past = nested_prefix(MAX_NESTING + 1);
        assert_eq!(Fulfillment::from_der(&one_past), Err(too_deep.clone()));
        assert_eq!(Fulfillment::from_der(&nested_prefix(1_000)), Err(too_deep));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert_eq!(
            Fulfillment::from_der(&unhex("A0028000FFFF")),
            Err(CryptoError::TrailingBytes(2))
        );
    }
}
