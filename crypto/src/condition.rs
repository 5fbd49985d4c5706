//! Crypto-conditions: the hash commitment an escrow is locked with.

use crate::der::{self, Reader};
use crate::error::CryptoError;
use std::collections::BTreeSet;
use std::fmt;

/// The five standard condition types, numbered as in their ASN.1 choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionType {
    PreimageSha256 = 0,
    PrefixSha256 = 1,
    ThresholdSha256 = 2,
    RsaSha256 = 3,
    Ed25519Sha256 = 4,
}

impl ConditionType {
    pub const ALL: [Self; 5] = [
        Self::PreimageSha256,
        Self::PrefixSha256,
        Self::ThresholdSha256,
        Self::RsaSha256,
        Self::Ed25519Sha256,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Compound types commit to the types of their subconditions.
    pub fn is_compound(self) -> bool {
        matches!(self, Self::PrefixSha256 | Self::ThresholdSha256)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PreimageSha256 => "PREIMAGE-SHA-256",
            Self::PrefixSha256 => "PREFIX-SHA-256",
            Self::ThresholdSha256 => "THRESHOLD-SHA-256",
            Self::RsaSha256 => "RSA-SHA-256",
            Self::Ed25519Sha256 => "ED25519-SHA-256",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded condition: type, 32-byte fingerprint, cost, and (for compound
/// types) the set of subcondition types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Condition {
    kind: ConditionType,
    fingerprint: [u8; 32],
    cost: u64,
    subtypes: BTreeSet<ConditionType>,
}

impl Condition {
    pub fn new(
        kind: ConditionType,
        fingerprint: [u8; 32],
        cost: u64,
        subtypes: BTreeSet<ConditionType>,
    ) -> Self {
        let subtypes = if kind.is_compound() {
            subtypes
        } else {
            BTreeSet::new()
        };
        Self {
            kind,
            fingerprint,
            cost,
            subtypes,
        }
    }

    pub fn kind(&self) -> ConditionType {
        self.kind
    }

    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn subtypes(&self) -> &BTreeSet<ConditionType> {
        &self.subtypes
    }

    /// Decode exactly one condition; trailing bytes are an error.
    pub fn from_der(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut reader = Reader::new(bytes);
        let condition = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(condition)
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, CryptoError> {
        let (tag, body) = reader.tlv()?;
        if tag & 0xE0 != 0xA0 {
            return Err(CryptoError::Der("condition must be a constructed context tag"));
        }
        let kind = ConditionType::from_id(tag & 0x1F).ok_or(CryptoError::UnknownType(tag))?;

        let mut fields = Reader::new(body);
        let fingerprint: [u8; 32] = fields
            .expect_tag(der::primitive(0))?
            .try_into()
            .map_err(|_| CryptoError::Der("fingerprint must be 32 bytes"))?;
        let cost = der::decode_uint(fields.expect_tag(der::primitive(1))?)?;
        let subtypes = if kind.is_compound() {
            decode_subtypes(fields.expect_tag(der::primitive(2))?)?
        } else {
            BTreeSet::new()
        };
        fields.finish()?;

        Ok(Self {
            kind,
            fingerprint,
            cost,
            subtypes,
        })
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(48);
        der::write_tlv(&mut body, der::primitive(0), &self.fingerprint);
        der::write_tlv(&mut body, der::primitive(1), &der::encode_uint(self.cost));
        if self.kind.is_compound() {
            der::write_tlv(&mut body, der::primitive(2), &encode_subtypes(&self.subtypes));
        }
        let mut out = Vec::with_capacity(body.len() + 2);
        der::write_tlv(&mut out, der::constructed(self.kind.id()), &body);
        out
    }
}

/// Bit `n` (most significant first) marks type `n`; trailing zero bits are
/// dropped and counted in the leading "unused bits" byte.
fn encode_subtypes(types: &BTreeSet<ConditionType>) -> Vec<u8> {
    let Some(highest) = types.iter().map(|t| t.id()).max() else {
        return vec![0];
    };
    let bits: u8 = types.iter().fold(0, |acc, t| acc | (0x80 >> t.id()));
    vec![7 - highest, bits]
}

fn decode_subtypes(contents: &[u8]) -> Result<BTreeSet<ConditionType>, CryptoError> {
    let (unused, bits) = contents
        .split_first()
        .ok_or(CryptoError::Der("empty bit string"))?;
    if *unused > 7 || (bits.is_empty() && *unused != 0) {
        return Err(CryptoError::Der("invalid unused-bit count"));
    }
    let mut types = BTreeSet::new();
    for (byte_index, byte) in bits.iter().enumerate() {
        for bit in 0..8u8 {
            if byte & (0x80 >> bit) == 0 {
                continue;
            }
            let id = byte_index * 8 + usize::from(bit);
            let kind = u8::try_from(id)
                .ok()
                .and_then(ConditionType::from_id)
                .ok_or(CryptoError::Der("unknown subtype bit"))?;
            types.insert(kind);
        }
    }
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Condition for the empty preimage.
    const EMPTY_PREIMAGE_CONDITION: &str =
        "A0258020E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855810100";

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn decodes_preimage_condition() {
        let condition = Condition::from_der(&unhex(EMPTY_PREIMAGE_CONDITION)).unwrap();
        assert_eq!(condition.kind(), ConditionType::PreimageSha256);
        assert_eq!(condition.cost(), 0);
        assert_eq!(condition.fingerprint()[0], 0xE3);
        assert_eq!(condition.to_der(), unhex(EMPTY_PREIMAGE_CONDITION));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = unhex(EMPTY_PREIMAGE_CONDITION);
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE]);
        assert_eq!(Condition::from_der(&bytes), Err(CryptoError::TrailingBytes(3)));
    }

    #[test]
    fn compound_condition_round_trip() {
        let subtypes: BTreeSet<_> = [ConditionType::PreimageSha256, ConditionType::Ed25519Sha256]
            .into_iter()
            .collect();
        let condition =
            Condition::new(ConditionType::ThresholdSha256, [7u8; 32], 133_120, subtypes);
        let decoded = Condition::from_der(&condition.to_der()).unwrap();
        assert_eq!(decoded, condition);
    }

    #[test]
    fn subtype_bit_string() {
        let types: BTreeSet<_> = [ConditionType::PreimageSha256].into_iter().collect();
        assert_eq!(encode_subtypes(&types), vec![0x07, 0x80]);
        assert_eq!(encode_subtypes(&BTreeSet::new()), vec![0x00]);
        assert_eq!(decode_subtypes(&[0x07, 0x80]).unwrap(), types);
    }

    #[test]
    fn unknown_type_tag() {
        let mut bytes = unhex(EMPTY_PREIMAGE_CONDITION);
        bytes[0] = 0xA7;
        assert!(matches!(Condition::from_der(&bytes), Err(CryptoError::UnknownType(0xA7))));
    }
}
