//! Pseudo-transactions: injected by validators during consensus, never
//! signed by a user account.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{ensure, flag_pair, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Hash256, HexBlob, HexU64, XrpAmount};

pub mod flags {
    pub const TF_GOT_MAJORITY: u32 = 0x0001_0000;
    pub const TF_LOST_MAJORITY: u32 = 0x0002_0000;
}

use flags::*;

fn from_account_zero(common: &TransactionCommon) -> Result<(), TransactionError> {
    ensure(
        common.account == Address::ACCOUNT_ZERO,
        Rule::PseudoAccount,
        format!("pseudo-transactions are sent by {}", Address::ACCOUNT_ZERO),
    )
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnableAmendment {
    pub amendment: Hash256,
    pub ledger_sequence: u32,
}

impl Validate for EnableAmendment {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        from_account_zero(common)?;
        flag_pair(common.flags(), TF_GOT_MAJORITY, TF_LOST_MAJORITY, "amendment majority")
    }
}

/// Fee schedule change. Before the XRPFees amendment the values are fee
/// units; after it they are drop amounts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetFee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_sequence: Option<u32>,
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
}

impl SetFee {
    pub fn in_drops(
        base_fee: XrpAmount,
        reserve_base: XrpAmount,
        reserve_increment: XrpAmount,
    ) -> Self {
        Self {
            base_fee_drops: Some(base_fee),
            reserve_base_drops: Some(reserve_base),
            reserve_increment_drops: Some(reserve_increment),
            ..Self::default()
        }
    }

    fn legacy_fields(&self) -> [bool; 4] {
        [
            self.base_fee.is_some(),
            self.reference_fee_units.is_some(),
            self.reserve_base.is_some(),
            self.reserve_increment.is_some(),
        ]
    }

    fn drop_fields(&self) -> [bool; 3] {
        [
            self.base_fee_drops.is_some(),
            self.reserve_base_drops.is_some(),
            self.reserve_increment_drops.is_some(),
        ]
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy_fields().iter().any(|set| *set)
    }
}

impl Validate for SetFee {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        from_account_zero(common)?;
        let legacy = self.legacy_fields();
        let drops = self.drop_fields();
        let (form, complete, other) = if self.is_legacy() {
            ("fee-unit", legacy.iter().all(|set| *set), drops.iter().any(|set| *set))
        } else {
            ("drops", drops.iter().all(|set| *set), false)
        };
        ensure(!other, Rule::MutuallyExclusive, "SetFee cannot mix fee-unit and drops fields")?;
        ensure(
            complete,
            Rule::RequiredField,
            format!("SetFee in {form} form is missing fields"),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnlModify {
    pub ledger_sequence: u32,
    /// 1 disables the validator, 0 re-enables it.
    #[serde(rename = "UNLModifyDisabling")]
    pub unl_modify_disabling: u8,
    #[serde(rename = "UNLModifyValidator")]
    pub unl_modify_validator: HexBlob,
}

impl UnlModify {
    pub fn is_disabling(&self) -> bool {
        self.unl_modify_disabling == 1
    }
}

impl Validate for UnlModify {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        from_account_zero(common)?;
        ensure(
            self.unl_modify_disabling <= 1,
            Rule::Range,
            format!("UNLModifyDisabling must be 0 or 1, got {}", self.unl_modify_disabling),
        )?;
        ensure(
            !self.unl_modify_validator.is_empty(),
            Rule::RequiredField,
            "UNLModifyValidator must not be empty",
        )
    }
}
