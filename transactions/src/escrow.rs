//! Escrows: value held until a time passes or a crypto-condition is met.
//!
//! `EscrowFinish` carries its condition and fulfillment twice, as typed
//! values and as the raw hex that goes on the wire. The raw form is
//! authoritative. Ledger history contains conditions that do not decode, and
//! those must survive a decode/encode cycle untouched, so a raw value that
//! fails to decode leaves the typed value empty and is logged rather than
//! rejected.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{credential_ids, ensure, positive, required, Validate};
use serde::{Deserialize, Serialize};
use xrpl_crypto::{
    escrow_finish_fee, reconcile_condition, reconcile_fulfillment, Condition, CryptoError,
    Fulfillment, MalformedSubstructure,
};
use xrpl_ledger::Escrow;
use xrpl_types::{Address, CurrencyAmount, Hash256, HexBlob, RippleTime, XrpAmount};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCreate {
    pub amount: CurrencyAmount,
    pub destination: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_after: Option<RippleTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
}

impl EscrowCreate {
    pub fn new(destination: Address, amount: CurrencyAmount) -> Self {
        Self {
            amount,
            destination,
            cancel_after: None,
            finish_after: None,
            condition: None,
            destination_tag: None,
        }
    }

    pub fn with_condition(mut self, condition: &Condition) -> Self {
        self.condition = Some(HexBlob::from_bytes(&condition.to_der()));
        self
    }
}

impl Validate for EscrowCreate {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;

        ensure(
            self.cancel_after.is_some() || self.finish_after.is_some(),
            Rule::TimeBounds,
            "at least one of CancelAfter and FinishAfter is required",
        )?;
        if let (Some(finish), Some(cancel)) = (self.finish_after, self.cancel_after) {
            ensure(
                finish < cancel,
                Rule::TimeBounds,
                format!("FinishAfter {finish} must be earlier than CancelAfter {cancel}"),
            )?;
        }
        if self.finish_after.is_none() {
            required("Condition", self.condition.as_ref())?;
        }
        if !self.amount.is_native() {
            required("CancelAfter", self.cancel_after.as_ref())?;
        }

        // A new escrow must be created with a well-formed condition.
        if let Some(raw) = &self.condition {
            Condition::from_der(&raw.to_bytes())?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowFinish {
    pub owner: Address,
    pub offer_sequence: u32,
    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    condition_raw: Option<HexBlob>,
    #[serde(rename = "Fulfillment", skip_serializing_if = "Option::is_none")]
    fulfillment_raw: Option<HexBlob>,
    #[serde(rename = "CredentialIDs", skip_serializing_if = "Option::is_none")]
    pub credential_ids: Option<Vec<Hash256>>,
    #[serde(skip)]
    condition: Option<Condition>,
    #[serde(skip)]
    fulfillment: Option<Fulfillment>,
}

impl EscrowFinish {
    pub fn new(owner: Address, offer_sequence: u32) -> Self {
        Self {
            owner,
            offer_sequence,
            condition_raw: None,
            fulfillment_raw: None,
            credential_ids: None,
            condition: None,
            fulfillment: None,
        }
    }

    /// Draft a finish for an escrow read from the ledger. The stored
    /// condition is carried over as raw hex, decodable or not.
    pub fn for_escrow(escrow: &Escrow, offer_sequence: u32) -> Self {
        let mut finish = Self::new(escrow.account.clone(), offer_sequence);
        finish.condition_raw = escrow.condition.clone();
        finish
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_fulfillment(mut self, fulfillment: Fulfillment) -> Self {
        self.fulfillment = Some(fulfillment);
        self
    }

    pub fn with_raw_condition(mut self, raw: HexBlob) -> Self {
        self.condition_raw = Some(raw);
        self
    }

    pub fn with_raw_fulfillment(mut self, raw: HexBlob) -> Self {
        self.fulfillment_raw = Some(raw);
        self
    }

    /// The decoded condition; `None` when absent or undecodable.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn fulfillment(&self) -> Option<&Fulfillment> {
        self.fulfillment.as_ref()
    }

    pub fn condition_raw(&self) -> Option<&HexBlob> {
        self.condition_raw.as_ref()
    }

    pub fn fulfillment_raw(&self) -> Option<&HexBlob> {
        self.fulfillment_raw.as_ref()
    }

    /// Whether the fulfillment satisfies the condition, when both decode.
    pub fn is_fulfilled(&self) -> Option<bool> {
        let condition = self.condition.as_ref()?;
        let fulfillment = self.fulfillment.as_ref()?;
        Some(&fulfillment.derive_condition() == condition)
    }

    /// Transaction cost of this finish at `base_fee`.
    pub fn finish_fee(&self, base_fee: XrpAmount) -> Result<XrpAmount, TransactionError> {
        match (&self.fulfillment, &self.fulfillment_raw) {
            (Some(fulfillment), _) => Ok(escrow_finish_fee(base_fee, fulfillment)?),
            (None, None) => Ok(base_fee),
            (None, Some(_)) => Err(CryptoError::Der("fulfillment does not decode").into()),
        }
    }

    /// Bring the typed and raw forms into agreement. Undecodable raw data is
    /// kept and logged; typed and raw values that disagree are an error.
    pub(crate) fn normalize(&mut self) -> Result<(), TransactionError> {
        let condition = reconcile_condition(self.condition.take(), self.condition_raw.take())?;
        let fulfillment =
            reconcile_fulfillment(self.fulfillment.take(), self.fulfillment_raw.take())?;

        for warning in [&condition.warning, &fulfillment.warning].into_iter().flatten() {
            log_malformed(warning);
        }

        self.condition = condition.typed;
        self.condition_raw = condition.raw;
        self.fulfillment = fulfillment.typed;
        self.fulfillment_raw = fulfillment.raw;
        Ok(())
    }
}

fn log_malformed(warning: &MalformedSubstructure) {
    tracing::warn!(
        field = warning.field,
        raw = %warning.raw,
        reason = %warning.reason,
        "keeping undecodable escrow field as raw hex"
    );
}

impl Validate for EscrowFinish {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        ensure(
            self.condition_raw.is_some() == self.fulfillment_raw.is_some(),
            Rule::ConditionPair,
            "Condition and Fulfillment must be supplied together",
        )?;
        if let Some(ids) = &self.credential_ids {
            credential_ids(ids)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCancel {
    pub owner: Address,
    pub offer_sequence: u32,
}

impl EscrowCancel {
    pub fn for_escrow(escrow: &Escrow, offer_sequence: u32) -> Self {
        Self {
            owner: escrow.account.clone(),
            offer_sequence,
        }
    }
}

impl Validate for EscrowCancel {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}
