//! Singleton and bookkeeping entries maintained by the network itself:
//! amendments, fee settings, skip lists, the negative UNL and directories.

use crate::common::{EntryCommon, ZeroFlags};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Hash160, Hash256, HexU64, PublicKey, RippleTime, XrpAmount};

/// `{"Majority": {"Amendment": .., "CloseTime": ..}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Majority {
    #[serde(rename = "Majority")]
    pub majority: MajorityFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MajorityFields {
    pub amendment: Hash256,
    pub close_time: RippleTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amendments {
    pub flags: ZeroFlags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amendments: Vec<Hash256>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub majorities: Vec<Majority>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl Amendments {
    pub fn is_enabled(&self, amendment: &Hash256) -> bool {
        self.amendments.contains(amendment)
    }
}

/// Fee schedule. Older ledgers carry fee units, newer ones carry drops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeeSettings {
    pub flags: ZeroFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_fee_units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_base: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_increment: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee_drops: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_base_drops: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_increment_drops: Option<XrpAmount>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl FeeSettings {
    /// Base transaction cost in drops, whichever encoding the entry uses.
    pub fn base_fee_in_drops(&self) -> Option<u64> {
        self.base_fee_drops
            .map(|fee| fee.drops())
            .or_else(|| self.base_fee.as_ref().map(HexU64::value))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerHashes {
    pub flags: ZeroFlags,
    pub hashes: Vec<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_ledger_sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// `{"DisabledValidator": {"FirstLedgerSequence": .., "PublicKey": ..}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledValidator {
    #[serde(rename = "DisabledValidator")]
    pub disabled_validator: DisabledValidatorFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisabledValidatorFields {
    pub first_ledger_sequence: u32,
    pub public_key: PublicKey,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NegativeUnl {
    pub flags: ZeroFlags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_validators: Vec<DisabledValidator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator_to_disable: Option<PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator_to_re_enable: Option<PublicKey>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// An owner directory or an order book directory page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryNode {
    pub flags: u32,
    pub root_index: Hash256,
    pub indexes: Vec<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_next: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_previous: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_pays_currency: Option<Hash160>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_pays_issuer: Option<Hash160>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_gets_currency: Option<Hash160>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_gets_issuer: Option<Hash160>,
    #[serde(rename = "NFTokenID", skip_serializing_if = "Option::is_none")]
    pub nftoken_id: Option<Hash256>,
    #[serde(rename = "DomainID", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Hash256>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl DirectoryNode {
    /// Owner directories name their owner; book directories do not.
    pub fn is_owner_directory(&self) -> bool {
        self.owner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AMENDMENT: &str = "42426C4D4F1009EE67080A9B7965B44656D7714D104A72F9B4369F97ABF044EE";

    #[test]
    fn amendments_lookup() {
        let entry: Amendments = serde_json::from_value(json!({
            "Flags": 0,
            "Amendments": [AMENDMENT],
            "Majorities": [{"Majority": {"Amendment": AMENDMENT, "CloseTime": 779561310}}]
        }))
        .unwrap();
        assert!(entry.is_enabled(&Hash256::new(AMENDMENT).unwrap()));
        assert_eq!(entry.majorities.len(), 1);
    }

    #[test]
    fn fee_settings_both_encodings() {
        let legacy: FeeSettings = serde_json::from_value(json!({
            "Flags": 0,
            "BaseFee": "000000000000000A",
            "ReferenceFeeUnits": 10,
            "ReserveBase": 20000000,
            "ReserveIncrement": 5000000
        }))
        .unwrap();
        assert_eq!(legacy.base_fee_in_drops(), Some(10));

        let modern: FeeSettings = serde_json::from_value(json!({
            "Flags": 0,
            "BaseFeeDrops": "12",
            "ReserveBaseDrops": "10000000",
            "ReserveIncrementDrops": "2000000"
        }))
        .unwrap();
        assert_eq!(modern.base_fee_in_drops(), Some(12));
    }

    #[test]
    fn owner_directory() {
        let dir: DirectoryNode = serde_json::from_value(json!({
            "Flags": 0,
            "Owner": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "RootIndex": AMENDMENT,
            "Indexes": [AMENDMENT]
        }))
        .unwrap();
        assert!(dir.is_owner_directory());
    }
}
