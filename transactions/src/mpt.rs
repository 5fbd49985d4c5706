//! Multi-purpose token issuances and holdings.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{byte_range, distinct_accounts, ensure, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::amount::MAX_MPT_AMOUNT;
use xrpl_types::{params, Address, DecimalU64, HexBlob, MptIssuanceId};

pub mod flags {
    // MPTokenIssuanceCreate
    pub const TF_MPT_CAN_LOCK: u32 = 0x0000_0002;
    pub const TF_MPT_REQUIRE_AUTH: u32 = 0x0000_0004;
    pub const TF_MPT_CAN_ESCROW: u32 = 0x0000_0008;
    pub const TF_MPT_CAN_TRADE: u32 = 0x0000_0010;
    pub const TF_MPT_CAN_TRANSFER: u32 = 0x0000_0020;
    pub const TF_MPT_CAN_CLAWBACK: u32 = 0x0000_0040;

    // MPTokenIssuanceSet
    pub const TF_MPT_LOCK: u32 = 0x0000_0001;
    pub const TF_MPT_UNLOCK: u32 = 0x0000_0002;

    // MPTokenAuthorize
    pub const TF_MPT_UNAUTHORIZE: u32 = 0x0000_0001;
}

use flags::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenIssuanceCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_scale: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_amount: Option<DecimalU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u16>,
    #[serde(rename = "MPTokenMetadata", skip_serializing_if = "Option::is_none")]
    pub mptoken_metadata: Option<HexBlob>,
}

impl Validate for MpTokenIssuanceCreate {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        if let Some(fee) = self.transfer_fee {
            ensure(
                fee <= params::MAX_TRANSFER_FEE,
                Rule::Range,
                format!("TransferFee {fee} exceeds {}", params::MAX_TRANSFER_FEE),
            )?;
            ensure(
                fee == 0 || common.has_flag(TF_MPT_CAN_TRANSFER),
                Rule::FlagConflict,
                "a non-zero TransferFee requires tfMPTCanTransfer",
            )?;
        }
        if let Some(max) = &self.maximum_amount {
            ensure(
                max.value() > 0 && max.value() <= MAX_MPT_AMOUNT,
                Rule::Range,
                format!("MaximumAmount must be 1..={MAX_MPT_AMOUNT}"),
            )?;
        }
        if let Some(metadata) = &self.mptoken_metadata {
            byte_range("MPTokenMetadata", metadata, 1, params::MAX_MPT_METADATA_BYTES)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MpTokenIssuanceDestroy {
    #[serde(rename = "MPTokenIssuanceID")]
    pub mptoken_issuance_id: MptIssuanceId,
}

impl Validate for MpTokenIssuanceDestroy {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

/// Lock or unlock an issuance, or a single holder's balance of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenIssuanceSet {
    #[serde(rename = "MPTokenIssuanceID")]
    pub mptoken_issuance_id: MptIssuanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<Address>,
}

impl Validate for MpTokenIssuanceSet {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        ensure(
            !(common.has_flag(TF_MPT_LOCK) && common.has_flag(TF_MPT_UNLOCK)),
            Rule::FlagConflict,
            "tfMPTLock and tfMPTUnlock are exclusive",
        )?;
        match &self.holder {
            Some(holder) => distinct_accounts("Holder", holder, &common.account),
            None => Ok(()),
        }
    }
}

/// Opt in to holding a token, or (issuer side) authorize a holder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenAuthorize {
    #[serde(rename = "MPTokenIssuanceID")]
    pub mptoken_issuance_id: MptIssuanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<Address>,
}

impl Validate for MpTokenAuthorize {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        match &self.holder {
            Some(holder) => distinct_accounts("Holder", holder, &common.account),
            None => Ok(()),
        }
    }
}
