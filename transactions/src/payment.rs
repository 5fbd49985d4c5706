//! Payment: move value from one account to another, optionally rippling
//! through order books and trust lines.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{
    credential_ids, distinct_accounts, ensure, forbidden, positive, Validate,
};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Currency, CurrencyAmount, Hash256, MptIssuanceId};

pub mod flags {
    pub const TF_NO_RIPPLE_DIRECT: u32 = 0x0001_0000;
    pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;
    pub const TF_LIMIT_QUALITY: u32 = 0x0004_0000;
}

use flags::*;

/// One hop of a payment path. Keys are lowercase on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpt_issuance_id: Option<MptIssuanceId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub amount: CurrencyAmount,
    pub destination: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "InvoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<PathStep>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_max: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_min: Option<CurrencyAmount>,
    #[serde(rename = "CredentialIDs", skip_serializing_if = "Option::is_none")]
    pub credential_ids: Option<Vec<Hash256>>,
    #[serde(rename = "DomainID", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Hash256>,
}

impl Payment {
    pub fn new(destination: Address, amount: CurrencyAmount) -> Self {
        Self {
            amount,
            destination,
            destination_tag: None,
            invoice_id: None,
            paths: None,
            send_max: None,
            deliver_min: None,
            credential_ids: None,
            domain_id: None,
        }
    }

    /// Both the delivered and the spent side are the native currency.
    pub fn is_xrp_to_xrp(&self) -> bool {
        self.amount.is_native() && self.send_max.as_ref().map_or(true, CurrencyAmount::is_native)
    }
}

impl Validate for Payment {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let flags = common.flags();
        positive("Amount", &self.amount)?;

        if let Some(send_max) = &self.send_max {
            positive("SendMax", send_max)?;
        }
        if let Some(deliver_min) = &self.deliver_min {
            ensure(
                flags & TF_PARTIAL_PAYMENT != 0,
                Rule::FlagConflict,
                "DeliverMin requires tfPartialPayment",
            )?;
            positive("DeliverMin", deliver_min)?;
        }

        if self.is_xrp_to_xrp() {
            forbidden("SendMax", self.send_max.as_ref(), "on an XRP-to-XRP payment")?;
            forbidden("Paths", self.paths.as_ref(), "on an XRP-to-XRP payment")?;
            ensure(
                flags & (TF_PARTIAL_PAYMENT | TF_LIMIT_QUALITY | TF_NO_RIPPLE_DIRECT) == 0,
                Rule::FlagConflict,
                "XRP-to-XRP payments cannot be partial, quality-limited or direct-only",
            )?;
            distinct_accounts("Destination", &self.destination, &common.account)?;
        }

        if let Some(ids) = &self.credential_ids {
            credential_ids(ids)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_validate_xrp_payment() {
        let payment = Payment::new(bob(), xrp(1_000));
        assert!(payment.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_payment_zero_amount() {
        let payment = Payment::new(bob(), xrp(0));
        let err = payment.validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::PositiveAmount));
    }

    #[test]
    fn test_validate_xrp_payment_rejects_paths_and_send_max() {
        let mut payment = Payment::new(bob(), xrp(1_000));
        payment.paths = Some(vec![vec![PathStep::default()]]);
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::ForbiddenField)
        );

        let mut payment = Payment::new(bob(), xrp(1_000));
        payment.send_max = Some(xrp(2_000));
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::ForbiddenField)
        );
    }

    #[test]
    fn test_validate_xrp_payment_to_self() {
        let payment = Payment::new(alice(), xrp(1_000));
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::SelfReference)
        );
    }

    #[test]
    fn test_validate_deliver_min_needs_partial_flag() {
        let mut payment = Payment::new(bob(), usd("10", carol()));
        payment.send_max = Some(xrp(50_000_000));
        payment.deliver_min = Some(usd("5", carol()));
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::FlagConflict)
        );
        assert!(payment.validate(&with_flags(alice(), TF_PARTIAL_PAYMENT)).is_ok());
    }

    #[test]
    fn test_validate_cross_currency_self_payment() {
        // Converting through the books back to yourself is allowed.
        let mut payment = Payment::new(alice(), usd("10", carol()));
        payment.send_max = Some(xrp(50_000_000));
        assert!(payment.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_payment_credential_ids() {
        let id = Hash256::new("A".repeat(64)).unwrap();
        let mut payment = Payment::new(bob(), xrp(1));
        payment.credential_ids = Some(vec![id.clone(), id]);
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::Duplicate)
        );
        payment.credential_ids = Some(Vec::new());
        assert_eq!(
            payment.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::ListLength)
        );
    }
}
