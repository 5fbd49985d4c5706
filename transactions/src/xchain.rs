//! Cross-chain bridge transactions.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{ensure, positive, Validate};
use serde::{Deserialize, Serialize};
use xrpl_ledger::XChainBridge;
use xrpl_types::wire::bool_as_int;
use xrpl_types::{Address, CurrencyAmount, HexBlob, HexU64, PublicKey};

pub mod flags {
    pub const TF_CLEAR_ACCOUNT_CREATE_AMOUNT: u32 = 0x0001_0000;
}

use flags::*;

fn non_negative(field: &str, amount: &CurrencyAmount) -> Result<(), TransactionError> {
    ensure(!amount.is_negative(), Rule::Range, format!("{field} cannot be negative"))
}

fn door_account(bridge: &XChainBridge, account: &Address) -> Result<(), TransactionError> {
    ensure(
        bridge.is_door(account),
        Rule::SelfReference,
        format!("{account} is not a door account of the bridge"),
    )
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainCreateBridge {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    pub signature_reward: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_account_create_amount: Option<CurrencyAmount>,
}

impl Validate for XChainCreateBridge {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        door_account(&self.xchain_bridge, &common.account)?;
        ensure(
            self.xchain_bridge.locking_chain_door != self.xchain_bridge.issuing_chain_door,
            Rule::SelfReference,
            "the two door accounts must differ",
        )?;
        non_negative("SignatureReward", &self.signature_reward)?;
        if let Some(min) = &self.min_account_create_amount {
            positive("MinAccountCreateAmount", min)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainModifyBridge {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_reward: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_account_create_amount: Option<CurrencyAmount>,
}

impl Validate for XChainModifyBridge {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        door_account(&self.xchain_bridge, &common.account)?;
        let clearing = common.has_flag(TF_CLEAR_ACCOUNT_CREATE_AMOUNT);
        ensure(
            self.signature_reward.is_some() || self.min_account_create_amount.is_some() || clearing,
            Rule::RequiredField,
            "nothing to modify",
        )?;
        ensure(
            !(clearing && self.min_account_create_amount.is_some()),
            Rule::FlagConflict,
            "cannot set MinAccountCreateAmount while clearing it",
        )?;
        if let Some(reward) = &self.signature_reward {
            non_negative("SignatureReward", reward)?;
        }
        if let Some(min) = &self.min_account_create_amount {
            positive("MinAccountCreateAmount", min)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainCreateClaimId {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    pub signature_reward: CurrencyAmount,
    pub other_chain_source: Address,
}

impl Validate for XChainCreateClaimId {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        non_negative("SignatureReward", &self.signature_reward)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainCommit {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(rename = "XChainClaimID")]
    pub xchain_claim_id: HexU64,
    pub amount: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_chain_destination: Option<Address>,
}

impl Validate for XChainCommit {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainClaim {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(rename = "XChainClaimID")]
    pub xchain_claim_id: HexU64,
    pub destination: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    pub amount: CurrencyAmount,
}

impl Validate for XChainClaim {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainAccountCreateCommit {
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    pub destination: Address,
    pub amount: CurrencyAmount,
    pub signature_reward: CurrencyAmount,
}

impl Validate for XChainAccountCreateCommit {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;
        non_negative("SignatureReward", &self.signature_reward)
    }
}

/// A witness server's attestation that a commit happened on the other chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainAddClaimAttestation {
    pub amount: CurrencyAmount,
    pub attestation_reward_account: Address,
    pub attestation_signer_account: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Address>,
    pub other_chain_source: Address,
    pub public_key: PublicKey,
    pub signature: HexBlob,
    #[serde(with = "bool_as_int")]
    pub was_locking_chain_send: bool,
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
    #[serde(rename = "XChainClaimID")]
    pub xchain_claim_id: HexU64,
}

impl Validate for XChainAddClaimAttestation {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;
        ensure(!self.signature.is_empty(), Rule::RequiredField, "Signature must not be empty")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainAddAccountCreateAttestation {
    pub amount: CurrencyAmount,
    pub attestation_reward_account: Address,
    pub attestation_signer_account: Address,
    pub destination: Address,
    pub other_chain_source: Address,
    pub public_key: PublicKey,
    pub signature: HexBlob,
    pub signature_reward: CurrencyAmount,
    #[serde(with = "bool_as_int")]
    pub was_locking_chain_send: bool,
    #[serde(rename = "XChainAccountCreateCount")]
    pub xchain_account_create_count: HexU64,
    #[serde(rename = "XChainBridge")]
    pub xchain_bridge: XChainBridge,
}

impl Validate for XChainAddAccountCreateAttestation {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;
        non_negative("SignatureReward", &self.signature_reward)?;
        ensure(!self.signature.is_empty(), Rule::RequiredField, "Signature must not be empty")
    }
}
