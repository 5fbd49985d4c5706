//! Cross-chain bridge entries and the claim ids that track transfers
//! across them.

use crate::common::{EntryCommon, ZeroFlags};
use serde::{Deserialize, Serialize};
use xrpl_types::wire::bool_as_int;
use xrpl_types::{Address, CurrencyAmount, HexU64, Issue, PublicKey};

/// The two door accounts and assets that identify a bridge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainBridge {
    pub locking_chain_door: Address,
    pub locking_chain_issue: Issue,
    pub issuing_chain_door: Address,
    pub issuing_chain_issue: Issue,
}

impl XChainBridge {
    /// Whether `account` is one of the two door accounts.
    pub fn is_door(&self, account: &Address) -> bool {
        &self.locking_chain_door == account || &self.issuing_chain_door == account
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bridge {
    pub account: Address,
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    pub signature_reward: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_account_create_amount: Option<CurrencyAmount>,
    #[serde(rename = "XChainAccountClaimCount")]
    pub xchain_account_claim_count: HexU64,
    #[serde(rename = "XChainAccountCreateCount")]
    pub xchain_account_create_count: HexU64,
    #[serde(rename = "XChainClaimID")]
    pub xchain_claim_id: HexU64,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// A witness attestation collected on a claim id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimAttestation {
    #[serde(rename = "XChainClaimProofSig")]
    pub proof: ClaimProof,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClaimProof {
    pub attestation_reward_account: Address,
    pub attestation_signer_account: Address,
    pub amount: CurrencyAmount,
    pub public_key: PublicKey,
    #[serde(with = "bool_as_int")]
    pub was_locking_chain_send: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Address>,
}

/// A witness attestation collected for an account-create transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountAttestation {
    #[serde(rename = "XChainCreateAccountProofSig")]
    pub proof: CreateAccountProof,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAccountProof {
    pub attestation_reward_account: Address,
    pub attestation_signer_account: Address,
    pub amount: CurrencyAmount,
    pub signature_reward: CurrencyAmount,
    pub public_key: PublicKey,
    #[serde(with = "bool_as_int")]
    pub was_locking_chain_send: bool,
    pub destination: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainOwnedClaimId {
    pub account: Address,
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(rename = "XChainClaimID")]
    pub xchain_claim_id: HexU64,
    pub other_chain_source: Address,
    #[serde(rename = "XChainClaimAttestations", default)]
    pub xchain_claim_attestations: Vec<ClaimAttestation>,
    pub signature_reward: CurrencyAmount,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(flatten)]
    pub common: EntryCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainOwnedCreateAccountClaimId {
    pub account: Address,
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(rename = "XChainAccountCreateCount")]
    pub xchain_account_create_count: HexU64,
    #[serde(rename = "XChainCreateAccountAttestations", default)]
    pub xchain_create_account_attestations: Vec<CreateAccountAttestation>,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(flatten)]
    pub common: EntryCommon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOOR: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    fn bridge_json() -> serde_json::Value {
        json!({
            "LockingChainDoor": DOOR,
            "LockingChainIssue": {"currency": "XRP"},
            "IssuingChainDoor": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "IssuingChainIssue": {"currency": "XRP"}
        })
    }

    #[test]
    fn bridge_entry_round_trip() {
        let raw = json!({
            "Account": DOOR,
            "XChainBridge": bridge_json(),
            "SignatureReward": "200",
            "MinAccountCreateAmount": "2000000000",
            "XChainAccountClaimCount": "0",
            "XChainAccountCreateCount": "0",
            "XChainClaimID": "1",
            "Flags": 0,
            "OwnerNode": "0"
        });
        let bridge: Bridge = serde_json::from_value(raw.clone()).unwrap();
        assert!(bridge.xchain_bridge.is_door(&Address::new(DOOR).unwrap()));
        assert_eq!(bridge.xchain_claim_id.value(), 1);
        assert_eq!(serde_json::to_value(&bridge).unwrap(), raw);
    }

    #[test]
    fn claim_attestation_booleans_are_integers() {
        let claim: XChainOwnedClaimId = serde_json::from_value(json!({
            "Account": DOOR,
            "XChainBridge": bridge_json(),
            "XChainClaimID": "2",
            "OtherChainSource": "rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW",
            "XChainClaimAttestations": [{
                "XChainClaimProofSig": {
                    "AttestationRewardAccount": "r9cZA1mLK5R5Am25ArfXFmqgNwjZgnfk59",
                    "AttestationSignerAccount": "r9cZA1mLK5R5Am25ArfXFmqgNwjZgnfk59",
                    "Amount": "1000000",
                    "PublicKey": "ED5F5AC8B98974A3CA843326D9B88CEBD0560177B973EE0B149F782CFAA06DC66A",
                    "WasLockingChainSend": 1
                }
            }],
            "SignatureReward": "100",
            "Flags": 0,
            "OwnerNode": "0"
        }))
        .unwrap();
        assert!(claim.xchain_claim_attestations[0].proof.was_locking_chain_send);
        let out = serde_json::to_value(&claim).unwrap();
        assert_eq!(
            out["XChainClaimAttestations"][0]["XChainClaimProofSig"]["WasLockingChainSend"],
            json!(1)
        );
    }
}
