//! Entries that hold value in transit or on offer: offers, checks, escrows,
//! payment channels, trust lines and AMM pools.

use crate::common::{EntryCommon, ZeroFlags};
use serde::{Deserialize, Serialize};
use xrpl_crypto::Condition;
use xrpl_types::{
    Address, CurrencyAmount, Hash256, HexBlob, HexU64, Issue, IssuedCurrencyAmount, PublicKey,
    RippleTime, XrpAmount,
};

/// `Offer` flag bits.
pub mod offer_flags {
    pub const LSF_PASSIVE: u32 = 0x0001_0000;
    pub const LSF_SELL: u32 = 0x0002_0000;
    pub const LSF_HYBRID: u32 = 0x0004_0000;
}

/// `RippleState` flag bits.
pub mod ripple_state_flags {
    pub const LSF_LOW_RESERVE: u32 = 0x0001_0000;
    pub const LSF_HIGH_RESERVE: u32 = 0x0002_0000;
    pub const LSF_LOW_AUTH: u32 = 0x0004_0000;
    pub const LSF_HIGH_AUTH: u32 = 0x0008_0000;
    pub const LSF_LOW_NO_RIPPLE: u32 = 0x0010_0000;
    pub const LSF_HIGH_NO_RIPPLE: u32 = 0x0020_0000;
    pub const LSF_LOW_FREEZE: u32 = 0x0040_0000;
    pub const LSF_HIGH_FREEZE: u32 = 0x0080_0000;
    pub const LSF_LOW_DEEP_FREEZE: u32 = 0x0200_0000;
    pub const LSF_HIGH_DEEP_FREEZE: u32 = 0x0400_0000;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Offer {
    pub account: Address,
    pub book_directory: Hash256,
    pub book_node: HexU64,
    pub flags: u32,
    pub owner_node: HexU64,
    pub sequence: u32,
    pub taker_gets: CurrencyAmount,
    pub taker_pays: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(rename = "DomainID", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Hash256>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl Offer {
    pub fn is_sell(&self) -> bool {
        self.flags & offer_flags::LSF_SELL != 0
    }

    pub fn is_passive(&self) -> bool {
        self.flags & offer_flags::LSF_PASSIVE != 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Check {
    pub account: Address,
    pub destination: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub send_max: CurrencyAmount,
    pub sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(rename = "InvoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// Value held until a time or crypto-condition releases it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Escrow {
    pub account: Address,
    pub destination: Address,
    pub amount: CurrencyAmount,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl Escrow {
    /// The typed condition, if the stored bytes decode exactly.
    ///
    /// Historical entries can hold malformed conditions; those stay
    /// available as raw hex in `condition`.
    pub fn decoded_condition(&self) -> Option<Condition> {
        let raw = self.condition.as_ref()?;
        match Condition::from_der(&raw.to_bytes()) {
            Ok(condition) => Some(condition),
            Err(err) => {
                tracing::debug!(condition = %raw, error = %err, "escrow condition does not decode");
                None
            }
        }
    }

    /// Whether `EscrowFinish` may be submitted at `now`.
    pub fn can_finish(&self, now: RippleTime) -> bool {
        let after_finish = self.finish_after.map_or(true, |t| now > t);
        let before_cancel = self.cancel_after.map_or(true, |t| now < t);
        after_finish && before_cancel
    }

    /// Whether `EscrowCancel` may be submitted at `now`.
    pub fn can_cancel(&self, now: RippleTime) -> bool {
        self.cancel_after.is_some_and(|t| now >= t)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayChannel {
    pub account: Address,
    pub destination: Address,
    pub amount: XrpAmount,
    pub balance: XrpAmount,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub public_key: PublicKey,
    pub settle_delay: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl PayChannel {
    /// Drops still claimable by the destination.
    pub fn remaining(&self) -> Result<XrpAmount, xrpl_types::TypesError> {
        self.amount.minus(self.balance)
    }
}

/// A trust line between two accounts. The `Balance` issuer is the neutral
/// account and the sign says which side holds the debt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RippleState {
    pub balance: IssuedCurrencyAmount,
    pub flags: u32,
    pub high_limit: IssuedCurrencyAmount,
    pub low_limit: IssuedCurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_quality_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_quality_out: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_quality_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_quality_out: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl RippleState {
    pub fn low_account(&self) -> &Address {
        self.low_limit.issuer()
    }

    pub fn high_account(&self) -> &Address {
        self.high_limit.issuer()
    }

    pub fn is_frozen_by_low(&self) -> bool {
        self.flags & ripple_state_flags::LSF_LOW_FREEZE != 0
    }

    pub fn is_frozen_by_high(&self) -> bool {
        self.flags & ripple_state_flags::LSF_HIGH_FREEZE != 0
    }
}

/// `{"AuthAccount": {"Account": ..}}`; shared with `AMMBid`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthAccount {
    #[serde(rename = "AuthAccount")]
    pub auth_account: AuthAccountFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthAccountFields {
    pub account: Address,
}

impl AuthAccount {
    pub fn new(account: Address) -> Self {
        Self {
            auth_account: AuthAccountFields { account },
        }
    }

    pub fn account(&self) -> &Address {
        &self.auth_account.account
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuctionSlot {
    pub account: Address,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auth_accounts: Vec<AuthAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_fee: Option<u32>,
    pub expiration: RippleTime,
    pub price: CurrencyAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSlot {
    #[serde(rename = "VoteEntry")]
    pub vote_entry: VoteEntry,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoteEntry {
    pub account: Address,
    pub trading_fee: u16,
    pub vote_weight: u32,
}

/// An automated market maker pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amm {
    pub account: Address,
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(rename = "LPTokenBalance")]
    pub lp_token_balance: CurrencyAmount,
    pub trading_fee: u16,
    pub flags: ZeroFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction_slot: Option<AuctionSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vote_slots: Vec<VoteSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_node: Option<HexU64>,
    #[serde(flatten)]
    pub common: EntryCommon,
}
