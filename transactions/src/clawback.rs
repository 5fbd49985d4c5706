//! Issuer clawback of issued currencies and multi-purpose tokens.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{distinct_accounts, forbidden, positive, required, violation, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, CurrencyAmount};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Clawback {
    /// For issued currencies the amount's issuer field names the holder.
    pub amount: CurrencyAmount,
    /// Token holder; multi-purpose tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<Address>,
}

impl Validate for Clawback {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;
        match &self.amount {
            CurrencyAmount::Xrp(_) => Err(violation(Rule::AmountKind, "XRP cannot be clawed back")),
            CurrencyAmount::Issued(amount) => {
                forbidden("Holder", self.holder.as_ref(), "for an issued currency")?;
                distinct_accounts("Amount issuer", amount.issuer(), &common.account)
            }
            CurrencyAmount::Mpt(_) => {
                required("Holder", self.holder.as_ref())?;
                match &self.holder {
                    Some(holder) => distinct_accounts("Holder", holder, &common.account),
                    None => Ok(()),
                }
            }
        }
    }
}
