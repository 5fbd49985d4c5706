//! Checks: deferred payments the destination cashes later.

use crate::common::TransactionCommon;
use crate::error::TransactionError;
use crate::validation::{distinct_accounts, exactly_one, positive, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, CurrencyAmount, Hash256, RippleTime};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckCreate {
    pub destination: Address,
    pub send_max: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(rename = "InvoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Hash256>,
}

impl Validate for CheckCreate {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_accounts("Destination", &self.destination, &common.account)?;
        positive("SendMax", &self.send_max)
    }
}

/// Cash a check for an exact amount or for whatever can be delivered above
/// a floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckCash {
    #[serde(rename = "CheckID")]
    pub check_id: Hash256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_min: Option<CurrencyAmount>,
}

impl Validate for CheckCash {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        exactly_one(&[
            ("Amount", self.amount.is_some()),
            ("DeliverMin", self.deliver_min.is_some()),
        ])?;
        match (&self.amount, &self.deliver_min) {
            (Some(amount), _) => positive("Amount", amount),
            (None, Some(deliver_min)) => positive("DeliverMin", deliver_min),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckCancel {
    #[serde(rename = "CheckID")]
    pub check_id: Hash256,
}

impl Validate for CheckCancel {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;
    use crate::test_support::*;

    fn check_id() -> Hash256 {
        Hash256::new("49647F0D748DC3FE26BDACBC57F251AADEFFF391403EC9BF87C97F67E9977FB0").unwrap()
    }

    #[test]
    fn test_validate_check_create_to_self() {
        let tx = CheckCreate {
            destination: alice(),
            send_max: xrp(100),
            destination_tag: None,
            expiration: None,
            invoice_id: None,
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::SelfReference));
    }

    #[test]
    fn test_validate_check_cash_exactly_one() {
        let mut tx = CheckCash {
            check_id: check_id(),
            amount: Some(xrp(100)),
            deliver_min: None,
        };
        assert!(tx.validate(&common(bob())).is_ok());

        tx.deliver_min = Some(xrp(50));
        assert_eq!(
            tx.validate(&common(bob())).unwrap_err().rule(),
            Some(Rule::MutuallyExclusive)
        );

        tx.amount = None;
        assert!(tx.validate(&common(bob())).is_ok());

        tx.deliver_min = None;
        assert_eq!(
            tx.validate(&common(bob())).unwrap_err().rule(),
            Some(Rule::MutuallyExclusive)
        );
    }
}
