//! Multi-purpose token issuances and holder balances.

use crate::common::EntryCommon;
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, DecimalU64, HexBlob, HexU64, MptIssuanceId};

pub mod flags {
    pub const LSF_MPT_LOCKED: u32 = 0x0000_0001;
    pub const LSF_MPT_CAN_LOCK: u32 = 0x0000_0002;
    pub const LSF_MPT_REQUIRE_AUTH: u32 = 0x0000_0004;
    pub const LSF_MPT_CAN_ESCROW: u32 = 0x0000_0008;
    pub const LSF_MPT_CAN_TRADE: u32 = 0x0000_0010;
    pub const LSF_MPT_CAN_TRANSFER: u32 = 0x0000_0020;
    pub const LSF_MPT_CAN_CLAWBACK: u32 = 0x0000_0040;

    /// `MPToken` only: the issuer has authorized this holder.
    pub const LSF_MPT_AUTHORIZED: u32 = 0x0000_0002;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenIssuance {
    pub issuer: Address,
    pub sequence: u32,
    pub flags: u32,
    pub owner_node: HexU64,
    pub outstanding_amount: DecimalU64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_scale: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_amount: Option<DecimalU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_amount: Option<DecimalU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u16>,
    #[serde(rename = "MPTokenMetadata", skip_serializing_if = "Option::is_none")]
    pub mptoken_metadata: Option<HexBlob>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl MpTokenIssuance {
    pub fn is_locked(&self) -> bool {
        self.flags & flags::LSF_MPT_LOCKED != 0
    }

    /// Units that may still be issued before the cap is hit.
    pub fn headroom(&self) -> Option<u64> {
        let max = self.maximum_amount.as_ref()?.value();
        Some(max.saturating_sub(self.outstanding_amount.value()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpToken {
    pub account: Address,
    #[serde(rename = "MPTokenIssuanceID")]
    pub mptoken_issuance_id: MptIssuanceId,
    pub flags: u32,
    pub owner_node: HexU64,
    #[serde(rename = "MPTAmount", skip_serializing_if = "Option::is_none")]
    pub mpt_amount: Option<DecimalU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_amount: Option<DecimalU64>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl MpToken {
    pub fn balance(&self) -> u64 {
        self.mpt_amount.as_ref().map_or(0, DecimalU64::value)
    }

    pub fn is_authorized(&self) -> bool {
        self.flags & flags::LSF_MPT_AUTHORIZED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSUANCE: &str = "00000001A407AF5856CCF3C42619DAA925813FC955C72983";

    #[test]
    fn issuance_headroom() {
        let issuance: MpTokenIssuance = serde_json::from_value(json!({
            "Issuer": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "Sequence": 1,
            "Flags": 0x62,
            "OwnerNode": "0",
            "OutstandingAmount": "400",
            "MaximumAmount": "1000",
            "AssetScale": 2
        }))
        .unwrap();
        assert_eq!(issuance.headroom(), Some(600));
        assert!(!issuance.is_locked());
    }

    #[test]
    fn holder_balance_defaults_to_zero() {
        let raw = json!({
            "Account": "rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW",
            "MPTokenIssuanceID": ISSUANCE,
            "Flags": 2,
            "OwnerNode": "0"
        });
        let token: MpToken = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(token.balance(), 0);
        assert!(token.is_authorized());
        assert_eq!(serde_json::to_value(&token).unwrap(), raw);
    }
}
