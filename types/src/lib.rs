//! Primitive types for the XRPL protocol data model.
//!
//! Every wrapper here validates its input once, at construction, and is
//! immutable afterwards: addresses, fixed-width hex identifiers, hex blobs,
//! public keys, currency codes, and the three-way [`CurrencyAmount`] union.

pub mod address;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod params;
pub mod time;
pub mod tx_type;
pub mod wire;

pub use address::Address;
pub use amount::{CurrencyAmount, IouValue, IssuedCurrencyAmount, MptAmount, XrpAmount};
pub use blob::HexBlob;
pub use currency::{Currency, Issue};
pub use error::TypesError;
pub use hash::{Hash128, Hash160, Hash256, MptIssuanceId};
pub use keys::{PublicKey, Signature};
pub use network::NetworkId;
pub use time::RippleTime;
pub use tx_type::{GranularPermission, Permission, PermissionValue, TransactionType};
pub use wire::{DecimalU64, HexU64, UnknownFields};
