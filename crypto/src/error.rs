use thiserror::Error;
use xrpl_types::TypesError;

use crate::condition::ConditionType;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("malformed DER: {0}")]
    Der(&'static str),

    #[error("{0} trailing bytes after the encoded value")]
    TrailingBytes(usize),

    #[error("unknown condition type tag {0:#04x}")]
    UnknownType(u8),

    #[error("{field}: typed value and raw hex encode different bytes")]
    RepresentationMismatch { field: &'static str },

    #[error("fee computation only supports PREIMAGE-SHA-256 fulfillments, got {0}")]
    UnsupportedFulfillment(ConditionType),

    #[error(transparent)]
    Amount(#[from] TypesError),
}
