//! Account-owned bookkeeping entries: the account root itself, signer lists,
//! tickets, deposit preauthorizations and delegations.

use crate::common::{EntryCommon, ZeroFlags};
use crate::identity::AuthorizeCredential;
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Hash128, Hash256, HexBlob, HexU64, Permission, XrpAmount};

/// `AccountRoot` flag bits.
pub mod flags {
    pub const LSF_PASSWORD_SPENT: u32 = 0x0001_0000;
    pub const LSF_REQUIRE_DEST_TAG: u32 = 0x0002_0000;
    pub const LSF_REQUIRE_AUTH: u32 = 0x0004_0000;
    pub const LSF_DISALLOW_XRP: u32 = 0x0008_0000;
    pub const LSF_DISABLE_MASTER: u32 = 0x0010_0000;
    pub const LSF_NO_FREEZE: u32 = 0x0020_0000;
    pub const LSF_GLOBAL_FREEZE: u32 = 0x0040_0000;
    pub const LSF_DEFAULT_RIPPLE: u32 = 0x0080_0000;
    pub const LSF_DEPOSIT_AUTH: u32 = 0x0100_0000;
    pub const LSF_AMM: u32 = 0x0200_0000;
    pub const LSF_DISALLOW_INCOMING_NFTOKEN_OFFER: u32 = 0x0400_0000;
    pub const LSF_DISALLOW_INCOMING_CHECK: u32 = 0x0800_0000;
    pub const LSF_DISALLOW_INCOMING_PAY_CHAN: u32 = 0x1000_0000;
    pub const LSF_DISALLOW_INCOMING_TRUSTLINE: u32 = 0x2000_0000;
    pub const LSF_ALLOW_TRUSTLINE_CLAWBACK: u32 = 0x8000_0000;

    /// `SignerList`: the list counts as a single owner-reserve item.
    pub const LSF_ONE_OWNER_COUNT: u32 = 0x0001_0000;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRoot {
    pub account: Address,
    pub balance: XrpAmount,
    pub flags: u32,
    pub owner_count: u32,
    pub sequence: u32,
    #[serde(rename = "AccountTxnID", skip_serializing_if = "Option::is_none")]
    pub account_txn_id: Option<Hash256>,
    #[serde(rename = "AMMID", skip_serializing_if = "Option::is_none")]
    pub amm_id: Option<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<Hash128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_key: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<Hash256>,
    #[serde(rename = "BurnedNFTokens", skip_serializing_if = "Option::is_none")]
    pub burned_nftokens: Option<u32>,
    #[serde(rename = "MintedNFTokens", skip_serializing_if = "Option::is_none")]
    pub minted_nftokens: Option<u32>,
    #[serde(rename = "FirstNFTokenSequence", skip_serializing_if = "Option::is_none")]
    pub first_nftoken_sequence: Option<u32>,
    #[serde(rename = "NFTokenMinter", skip_serializing_if = "Option::is_none")]
    pub nftoken_minter: Option<Address>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl AccountRoot {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    pub fn requires_destination_tag(&self) -> bool {
        self.has_flag(flags::LSF_REQUIRE_DEST_TAG)
    }

    pub fn master_key_disabled(&self) -> bool {
        self.has_flag(flags::LSF_DISABLE_MASTER)
    }

    /// Whether this is the special account backing an AMM instance.
    pub fn is_amm(&self) -> bool {
        self.amm_id.is_some()
    }
}

/// One weighted member of a multi-signing list.
///
/// Wire shape: `{"SignerEntry": {"Account": .., "SignerWeight": ..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerEntry {
    #[serde(rename = "SignerEntry")]
    pub signer_entry: SignerEntryFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerEntryFields {
    pub account: Address,
    pub signer_weight: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<Hash256>,
}

impl SignerEntry {
    pub fn new(account: Address, signer_weight: u16) -> Self {
        Self {
            signer_entry: SignerEntryFields {
                account,
                signer_weight,
                wallet_locator: None,
            },
        }
    }

    pub fn account(&self) -> &Address {
        &self.signer_entry.account
    }

    pub fn weight(&self) -> u16 {
        self.signer_entry.signer_weight
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerList {
    pub flags: u32,
    pub owner_node: HexU64,
    pub signer_entries: Vec<SignerEntry>,
    #[serde(rename = "SignerListID")]
    pub signer_list_id: u32,
    pub signer_quorum: u32,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl SignerList {
    pub fn total_weight(&self) -> u32 {
        self.signer_entries.iter().map(|e| u32::from(e.weight())).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    pub account: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub ticket_sequence: u32,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// A preauthorization: either a single account or a set of credentials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositPreauth {
    pub account: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorize_credentials: Vec<AuthorizeCredential>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// Permissions `account` has handed to `authorize`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Delegate {
    pub account: Address,
    pub authorize: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub permissions: Vec<Permission>,
    #[serde(flatten)]
    pub common: EntryCommon,
}
