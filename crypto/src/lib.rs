//! Crypto-conditions for conditional escrows.
//!
//! - DER codec for conditions and fulfillments of all five standard types
//! - **SHA-256** fingerprints and cost calculation
//! - Typed/raw reconciliation that tolerates malformed historical data
//! - The escrow-finish fee formula keyed off the preimage length

mod der;

pub mod condition;
pub mod error;
pub mod fee;
pub mod fulfillment;
pub mod hash;
pub mod reconcile;

pub use condition::{Condition, ConditionType};
pub use error::CryptoError;
pub use fee::escrow_finish_fee;
pub use fulfillment::Fulfillment;
pub use hash::sha256;
pub use reconcile::{
    reconcile, reconcile_condition, reconcile_fulfillment, DerEncoded, MalformedSubstructure,
    Reconciled,
};
