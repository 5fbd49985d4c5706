//! Reconciling the typed and raw-hex forms of a condition or fulfillment.
//!
//! Historical ledger data contains conditions that do not decode, so the raw
//! hex is the source of truth: it is never discarded, and the typed form is
//! only filled in when it re-encodes to exactly the same bytes.

use crate::condition::Condition;
use crate::error::CryptoError;
use crate::fulfillment::Fulfillment;
use xrpl_types::HexBlob;

/// A value with a canonical DER encoding.
pub trait DerEncoded: Sized {
    fn from_der(bytes: &[u8]) -> Result<Self, CryptoError>;
    fn to_der(&self) -> Vec<u8>;
}

impl DerEncoded for Condition {
    fn from_der(bytes: &[u8]) -> Result<Self, CryptoError> {
        Condition::from_der(bytes)
    }

    fn to_der(&self) -> Vec<u8> {
        Condition::to_der(self)
    }
}

impl DerEncoded for Fulfillment {
    fn from_der(bytes: &[u8]) -> Result<Self, CryptoError> {
        Fulfillment::from_der(bytes)
    }

    fn to_der(&self) -> Vec<u8> {
        Fulfillment::to_der(self)
    }
}

/// Raw hex that could not be turned into a typed value. Not an error: the
/// owning object still constructs, keeping only the raw form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedSubstructure {
    pub field: &'static str,
    pub raw: HexBlob,
    pub reason: String,
}

/// Outcome of reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciled<T> {
    pub typed: Option<T>,
    pub raw: Option<HexBlob>,
    pub warning: Option<MalformedSubstructure>,
}

/// Bring `typed` and `raw` into agreement.
///
/// - neither present: nothing to do
/// - both present: they must encode identical bytes
/// - typed only: raw is derived from it
/// - raw only: typed is decoded when the decode is byte-exact, otherwise it
///   stays empty and a [`MalformedSubstructure`] is returned alongside
pub fn reconcile<T: DerEncoded>(
    field: &'static str,
    typed: Option<T>,
    raw: Option<HexBlob>,
) -> Result<Reconciled<T>, CryptoError> {
    match (typed, raw) {
        (None, None) => Ok(Reconciled {
            typed: None,
            raw: None,
            warning: None,
        }),
        (Some(typed), Some(raw)) => {
            if typed.to_der() != raw.to_bytes() {
                return Err(CryptoError::RepresentationMismatch { field });
            }
            Ok(Reconciled {
                typed: Some(typed),
                raw: Some(raw),
                warning: None,
            })
        }
        (Some(typed), None) => {
            let raw = HexBlob::from_bytes(&typed.to_der());
            Ok(Reconciled {
                typed: Some(typed),
                raw: Some(raw),
                warning: None,
            })
        }
        (None, Some(raw)) => {
            let bytes = raw.to_bytes();
            let decoded = T::from_der(&bytes).and_then(|value| {
                if value.to_der() == bytes {
                    Ok(value)
                } else {
                    Err(CryptoError::Der("re-encoding does not reproduce the raw bytes"))
                }
            });
            match decoded {
                Ok(value) => Ok(Reconciled {
                    typed: Some(value),
                    raw: Some(raw),
                    warning: None,
                }),
                Err(e) => Ok(Reconciled {
                    typed: None,
                    warning: Some(MalformedSubstructure {
                        field,
                        raw: raw.clone(),
                        reason: e.to_string(),
                    }),
                    raw: Some(raw),
                }),
            }
        }
    }
}

pub fn reconcile_condition(
    typed: Option<Condition>,
    raw: Option<HexBlob>,
) -> Result<Reconciled<Condition>, CryptoError> {
    reconcile("Condition", typed, raw)
}

pub fn reconcile_fulfillment(
    typed: Option<Fulfillment>,
    raw: Option<HexBlob>,
) -> Result<Reconciled<Fulfillment>, CryptoError> {
    reconcile("Fulfillment", typed, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der;

    const CONDITION: &str =
        "A0258020E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855810100";

    fn blob(s: &str) -> HexBlob {
        HexBlob::new(s).unwrap()
    }

    #[test]
    fn neither_is_a_no_op() {
        let r = reconcile_condition(None, None).unwrap();
        assert_eq!(r.typed, None);
        assert_eq!(r.raw, None);
        assert!(r.warning.is_none());
    }

    #[test]
    fn typed_only_derives_raw() {
        let condition = Fulfillment::preimage(Vec::new()).derive_condition();
        let r = reconcile_condition(Some(condition), None).unwrap();
        assert_eq!(r.raw, Some(blob(CONDITION)));
    }

    #[test]
    fn raw_only_decodes() {
        let r = reconcile_condition(None, Some(blob(CONDITION))).unwrap();
        assert!(r.typed.is_some());
        assert!(r.warning.is_none());
    }

    #[test]
    fn raw_with_trailing_garbage_keeps_raw_only() {
        let raw = format!("{CONDITION}DEADBE");
        let r = reconcile_condition(None, Some(blob(&raw))).unwrap();
        assert_eq!(r.typed, None);
        assert_eq!(r.raw.as_ref().map(HexBlob::as_str), Some(raw.as_str()));
        let warning = r.warning.unwrap();
        assert_eq!(warning.field, "Condition");
    }

    #[test]
    fn undecodable_raw_keeps_raw_only() {
        let r = reconcile_fulfillment(None, Some(blob("FFFF"))).unwrap();
        assert_eq!(r.typed, None);
        assert!(r.warning.is_some());
    }

    #[test]
    fn raw_text_is_kept_verbatim() {
        let raw = format!("{}deadbe", CONDITION.to_lowercase());
        let r = reconcile_condition(None, Some(blob(&raw))).unwrap();
        assert_eq!(r.typed, None);
        assert_eq!(r.raw.as_ref().map(HexBlob::as_str), Some(raw.as_str()));

        let lower = CONDITION.to_lowercase();
        let r = reconcile_condition(None, Some(blob(&lower))).unwrap();
        assert!(r.typed.is_some());
        assert_eq!(r.raw.as_ref().map(HexBlob::as_str), Some(lower.as_str()));
    }

    #[test]
    fn deeply_nested_raw_keeps_raw_only() {
        let mut encoded = Fulfillment::preimage(Vec::new()).to_der();
        for _ in 0..1_000 {
            let mut body = Vec::new();
            der::write_tlv(&mut body, der::primitive(0), &[]);
            der::write_tlv(&mut body, der::primitive(1), &der::encode_uint(0));
            der::write_tlv(&mut body, der::constructed(2), &encoded);
            encoded.clear();
            der::write_tlv(&mut encoded, der::constructed(1), &body);
        }
        let raw = HexBlob::from_bytes(&encoded);

        let r = reconcile_fulfillment(None, Some(raw.clone())).unwrap();
        assert_eq!(r.typed, None);
        assert_eq!(r.raw, Some(raw));
        assert_eq!(r.warning.unwrap().field, "Fulfillment");
    }

    #[test]
    fn mismatch_is_fatal() {
        let other = Fulfillment::preimage(b"x".to_vec()).derive_condition();
        assert_eq!(
            reconcile_condition(Some(other), Some(blob(CONDITION))),
            Err(CryptoError::RepresentationMismatch { field: "Condition" })
        );
    }
}
