//! Errors raised when a primitive wrapper rejects its input.

use thiserror::Error;

/// A primitive value failed its own shape or bounds check.
///
/// These are always fatal for the construction that produced them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: &'static str },

    #[error("invalid {kind}: expected {expected} hex characters, got {actual:?}")]
    InvalidHash {
        kind: &'static str,
        expected: usize,
        actual: String,
    },

    #[error("invalid hex blob: {0}")]
    InvalidHex(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid 64-bit integer text {0:?}")]
    InvalidUInt64(String),

    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),

    #[error("amount {value} is out of range: {reason}")]
    AmountOutOfRange { value: String, reason: &'static str },

    #[error("malformed amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: &'static str },
}
