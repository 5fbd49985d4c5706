//! Payment channels: XRP streamed off-ledger and settled by claims.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{credential_ids, distinct_accounts, ensure, required, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Hash256, HexBlob, PublicKey, RippleTime, XrpAmount};

pub mod flags {
    /// Clear the channel's expiration.
    pub const TF_RENEW: u32 = 0x0001_0000;
    pub const TF_CLOSE: u32 = 0x0002_0000;
}

use flags::*;

fn positive_drops(field: &str, amount: &XrpAmount) -> Result<(), TransactionError> {
    ensure(
        !amount.is_zero() && !amount.is_negative(),
        Rule::PositiveAmount,
        format!("{field} must be positive"),
    )
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentChannelCreate {
    pub amount: XrpAmount,
    pub destination: Address,
    pub settle_delay: u32,
    pub public_key: PublicKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
}

impl Validate for PaymentChannelCreate {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        positive_drops("Amount", &self.amount)?;
        distinct_accounts("Destination", &self.destination, &common.account)?;
        ensure(
            !self.public_key.is_multi_sign(),
            Rule::RequiredField,
            "PublicKey must not be empty",
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentChannelFund {
    pub channel: Hash256,
    pub amount: XrpAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
}

impl Validate for PaymentChannelFund {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive_drops("Amount", &self.amount)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentChannelClaim {
    pub channel: Hash256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
    #[serde(rename = "CredentialIDs", skip_serializing_if = "Option::is_none")]
    pub credential_ids: Option<Vec<Hash256>>,
}

impl PaymentChannelClaim {
    pub fn new(channel: Hash256) -> Self {
        Self {
            channel,
            balance: None,
            amount: None,
            signature: None,
            public_key: None,
            credential_ids: None,
        }
    }
}

impl Validate for PaymentChannelClaim {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let flags = common.flags();
        ensure(
            flags & TF_RENEW == 0 || flags & TF_CLOSE == 0,
            Rule::FlagConflict,
            "tfRenew and tfClose are exclusive",
        )?;

        if let Some(balance) = &self.balance {
            positive_drops("Balance", balance)?;
        }
        if let Some(amount) = &self.amount {
            positive_drops("Amount", amount)?;
        }
        if let (Some(balance), Some(amount)) = (&self.balance, &self.amount) {
            ensure(
                balance.drops() <= amount.drops(),
                Rule::Range,
                "Balance cannot exceed the authorized Amount",
            )?;
        }
        if self.signature.is_some() {
            required("PublicKey", self.public_key.as_ref())?;
            required("Balance", self.balance.as_ref())?;
        }
        if let Some(ids) = &self.credential_ids {
            credential_ids(ids)?;
        }
        Ok(())
    }
}
