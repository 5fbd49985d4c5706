//! Ledger entry model.
//!
//! A ledger entry is a snapshot of on-ledger state: an account root, an
//! offer, an escrow, a bridge. Entries are decoded from their JSON form into
//! [`LedgerObject`], a tagged union keyed on `LedgerEntryType`. Entry types
//! this version does not know degrade to [`LedgerObject::Unknown`], and
//! fields it does not know are carried through untouched.
//!
//! The transaction layer reads entries only for reference (for example to
//! seed an `EscrowFinish` from an `Escrow`); nothing here mutates them.

pub mod account;
pub mod common;
pub mod error;
pub mod exchange;
pub mod identity;
pub mod mpt;
pub mod network;
pub mod nft;
pub mod object;
pub mod xchain;

pub use account::{AccountRoot, Delegate, DepositPreauth, SignerEntry, SignerList, Ticket};
pub use common::{EntryCommon, ZeroFlags};
pub use error::LedgerError;
pub use exchange::{Amm, AuthAccount, Check, Escrow, Offer, PayChannel, RippleState};
pub use identity::{
    AuthorizeCredential, Credential, CredentialId, Did, Oracle, PermissionedDomain, PriceData,
};
pub use mpt::{MpToken, MpTokenIssuance};
pub use network::{Amendments, DirectoryNode, FeeSettings, LedgerHashes, NegativeUnl};
pub use nft::{NfTokenIdParts, NfTokenOffer, NfTokenPage};
pub use object::{LedgerEntryType, LedgerObject};
pub use xchain::{Bridge, XChainBridge, XChainOwnedClaimId, XChainOwnedCreateAccountClaimId};
