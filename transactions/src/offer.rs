//! Order book offers.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{ensure, positive, required, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{CurrencyAmount, Hash256, RippleTime};

pub mod flags {
    pub const TF_PASSIVE: u32 = 0x0001_0000;
    pub const TF_IMMEDIATE_OR_CANCEL: u32 = 0x0002_0000;
    pub const TF_FILL_OR_KILL: u32 = 0x0004_0000;
    pub const TF_SELL: u32 = 0x0008_0000;
    /// Place the offer in both the open and the permissioned-domain book.
    pub const TF_HYBRID: u32 = 0x0010_0000;
}

use flags::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCreate {
    pub taker_gets: CurrencyAmount,
    pub taker_pays: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    /// An offer to cancel in the same transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_sequence: Option<u32>,
    #[serde(rename = "DomainID", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Hash256>,
}

impl OfferCreate {
    pub fn new(taker_gets: CurrencyAmount, taker_pays: CurrencyAmount) -> Self {
        Self {
            taker_gets,
            taker_pays,
            expiration: None,
            offer_sequence: None,
            domain_id: None,
        }
    }
}

impl Validate for OfferCreate {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let flags = common.flags();
        ensure(
            flags & TF_IMMEDIATE_OR_CANCEL == 0 || flags & TF_FILL_OR_KILL == 0,
            Rule::FlagConflict,
            "tfImmediateOrCancel and tfFillOrKill are exclusive",
        )?;
        if flags & TF_HYBRID != 0 {
            required("DomainID", self.domain_id.as_ref())?;
        }

        positive("TakerGets", &self.taker_gets)?;
        positive("TakerPays", &self.taker_pays)?;
        ensure(
            self.taker_gets.issue() != self.taker_pays.issue(),
            Rule::AmountKind,
            "TakerGets and TakerPays must be different assets",
        )?;
        if let Some(sequence) = self.offer_sequence {
            ensure(sequence != 0, Rule::Range, "OfferSequence must be non-zero")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCancel {
    pub offer_sequence: u32,
}

impl Validate for OfferCancel {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        ensure(self.offer_sequence != 0, Rule::Range, "OfferSequence must be non-zero")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_validate_offer_create() {
        let offer = OfferCreate::new(xrp(1_000_000), usd("1.5", carol()));
        assert!(offer.validate(&common(alice())).is_ok());
        assert!(offer.validate(&with_flags(alice(), TF_SELL | TF_PASSIVE)).is_ok());
    }

    #[test]
    fn test_validate_ioc_and_fok() {
        let offer = OfferCreate::new(xrp(1_000_000), usd("1.5", carol()));
        let err = offer
            .validate(&with_flags(alice(), TF_IMMEDIATE_OR_CANCEL | TF_FILL_OR_KILL))
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::FlagConflict));
    }

    #[test]
    fn test_validate_offer_same_asset() {
        let offer = OfferCreate::new(usd("1", carol()), usd("2", carol()));
        assert_eq!(offer.validate(&common(alice())).unwrap_err().rule(), Some(Rule::AmountKind));
        // Same currency from a different issuer is a different asset.
        let offer = OfferCreate::new(usd("1", carol()), usd("2", dave()));
        assert!(offer.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_hybrid_needs_domain() {
        let offer = OfferCreate::new(xrp(10), usd("1", carol()));
        let err = offer.validate(&with_flags(alice(), TF_HYBRID)).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::RequiredField));
    }

    #[test]
    fn test_validate_offer_cancel() {
        assert!(OfferCancel { offer_sequence: 7 }.validate(&common(alice())).is_ok());
        assert!(OfferCancel { offer_sequence: 0 }.validate(&common(alice())).is_err());
    }
}
