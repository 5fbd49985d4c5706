//! Non-fungible token pages and offers.

use crate::common::{EntryCommon, ZeroFlags};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, CurrencyAmount, Hash256, HexBlob, HexU64, RippleTime};

/// `NFTokenOffer` flag bit: the offer sells rather than buys.
pub const LSF_SELL_NFTOKEN: u32 = 0x0000_0001;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenOffer {
    pub amount: CurrencyAmount,
    pub flags: u32,
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Hash256,
    pub owner: Address,
    pub owner_node: HexU64,
    #[serde(rename = "NFTokenOfferNode", skip_serializing_if = "Option::is_none")]
    pub nftoken_offer_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl NfTokenOffer {
    pub fn is_sell_offer(&self) -> bool {
        self.flags & LSF_SELL_NFTOKEN != 0
    }
}

/// `{"NFToken": {"NFTokenID": .., "URI": ..}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfTokenSlot {
    #[serde(rename = "NFToken")]
    pub nftoken: NfToken,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfToken {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Hash256,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
}

/// A page of up to 32 tokens owned by one account, linked to its neighbours
/// by token id bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenPage {
    pub flags: ZeroFlags,
    #[serde(rename = "NFTokens")]
    pub nftokens: Vec<NfTokenSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_min: Option<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_min: Option<Hash256>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl NfTokenPage {
    pub const MAX_TOKENS: usize = 32;

    pub fn contains(&self, id: &Hash256) -> bool {
        self.nftokens.iter().any(|slot| &slot.nftoken.nftoken_id == id)
    }
}

/// Fields packed into a token id: flags, transfer fee, issuer account id,
/// scrambled taxon and mint sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfTokenIdParts {
    pub flags: u16,
    pub transfer_fee: u16,
    pub issuer_account_id: [u8; 20],
    pub taxon: u32,
    pub sequence: u32,
}

impl NfTokenIdParts {
    pub fn parse(id: &Hash256) -> Self {
        let raw = id.to_bytes();

        let flags = u16::from_be_bytes([raw[0], raw[1]]);
        let transfer_fee = u16::from_be_bytes([raw[2], raw[3]]);
        let mut issuer_account_id = [0u8; 20];
        issuer_account_id.copy_from_slice(&raw[4..24]);
        let scrambled = u32::from_be_bytes([raw[24], raw[25], raw[26], raw[27]]);
        let sequence = u32::from_be_bytes([raw[28], raw[29], raw[30], raw[31]]);

        Self {
            flags,
            transfer_fee,
            issuer_account_id,
            taxon: scrambled ^ taxon_cipher(sequence),
            sequence,
        }
    }
}

/// Linear congruential mask applied to the taxon so tokens minted in
/// sequence do not cluster in the same directory page.
fn taxon_cipher(sequence: u32) -> u32 {
    384_160_001u32.wrapping_mul(sequence).wrapping_add(2459)
}
