//! Transaction model.
//!
//! A [`Transaction`] is an envelope ([`TransactionCommon`]) plus a typed
//! payload ([`TransactionKind`]). Both halves are checked before a value
//! exists: first the envelope rules shared by every type, then the rules of
//! the payload's own type. A transaction that decodes but breaks a rule is
//! never observable, only the [`TransactionError`] naming the rule.
//!
//! - JSON decode/encode that carries unknown fields through verbatim
//! - Unknown discriminators degrade to [`TransactionKind::Unknown`]
//! - [`TransactionBuilder`] for programmatic construction, optionally
//!   preloaded from a [`ClientConfig`](xrpl_utils::ClientConfig)
//! - [`Batch`] envelope checks: inner transaction shape, mode flags and
//!   signer accounting

pub mod account;
pub mod amm;
pub mod batch;
pub mod builder;
pub mod channel;
pub mod check;
pub mod clawback;
pub mod common;
pub mod credential;
pub mod delegate;
pub mod deposit_preauth;
pub mod did;
pub mod error;
pub mod escrow;
pub mod kind;
pub mod mpt;
pub mod nft;
pub mod offer;
pub mod oracle;
pub mod payment;
pub mod pseudo;
pub mod transaction;
pub mod trust;
pub mod validation;
pub mod xchain;

#[cfg(test)]
mod test_support;

pub use batch::{Batch, BatchSigner, RawTransaction};
pub use builder::TransactionBuilder;
pub use common::{Memo, Signer, TransactionCommon};
pub use error::{Rule, TransactionError};
pub use kind::TransactionKind;
pub use transaction::Transaction;
pub use validation::{validate_common, Validate};
pub use xrpl_types::{PermissionValue, TransactionType};
