//! Trust lines.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{distinct_accounts, ensure, flag_pair, violation, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::CurrencyAmount;

pub mod flags {
    pub const TF_SETF_AUTH: u32 = 0x0001_0000;
    pub const TF_SET_NO_RIPPLE: u32 = 0x0002_0000;
    pub const TF_CLEAR_NO_RIPPLE: u32 = 0x0004_0000;
    pub const TF_SET_FREEZE: u32 = 0x0010_0000;
    pub const TF_CLEAR_FREEZE: u32 = 0x0020_0000;
    pub const TF_SET_DEEP_FREEZE: u32 = 0x0040_0000;
    pub const TF_CLEAR_DEEP_FREEZE: u32 = 0x0080_0000;
}

use flags::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustSet {
    /// Issued currency only; the issuer is the counterparty of the line.
    pub limit_amount: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_out: Option<u32>,
}

impl TrustSet {
    pub fn new(limit_amount: CurrencyAmount) -> Self {
        Self {
            limit_amount,
            quality_in: None,
            quality_out: None,
        }
    }
}

impl Validate for TrustSet {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let limit = match &self.limit_amount {
            CurrencyAmount::Issued(limit) => limit,
            CurrencyAmount::Xrp(_) | CurrencyAmount::Mpt(_) => {
                return Err(violation(Rule::AmountKind, "LimitAmount must be an issued currency"));
            }
        };
        ensure(!limit.is_negative(), Rule::Range, "LimitAmount cannot be negative")?;
        distinct_accounts("LimitAmount issuer", limit.issuer(), &common.account)?;

        let flags = common.flags();
        flag_pair(flags, TF_SET_NO_RIPPLE, TF_CLEAR_NO_RIPPLE, "NoRipple")?;
        flag_pair(flags, TF_SET_FREEZE, TF_CLEAR_FREEZE, "Freeze")?;
        flag_pair(flags, TF_SET_DEEP_FREEZE, TF_CLEAR_DEEP_FREEZE, "DeepFreeze")?;
        // Deep freeze sits on top of an ordinary freeze.
        flag_pair(flags, TF_SET_DEEP_FREEZE, TF_CLEAR_FREEZE, "Freeze while deep freezing")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_validate_trust_set() {
        let tx = TrustSet::new(usd("1000", bob()));
        assert!(tx.validate(&with_flags(alice(), TF_SET_NO_RIPPLE)).is_ok());
        assert!(tx.validate(&with_flags(alice(), TF_SET_FREEZE | TF_SET_DEEP_FREEZE)).is_ok());
    }

    #[test]
    fn test_validate_trust_set_conflicting_flags() {
        let tx = TrustSet::new(usd("1000", bob()));
        for flags in [
            TF_SET_NO_RIPPLE | TF_CLEAR_NO_RIPPLE,
            TF_SET_FREEZE | TF_CLEAR_FREEZE,
            TF_SET_DEEP_FREEZE | TF_CLEAR_DEEP_FREEZE,
            TF_SET_DEEP_FREEZE | TF_CLEAR_FREEZE,
        ] {
            let err = tx.validate(&with_flags(alice(), flags)).unwrap_err();
            assert_eq!(err.rule(), Some(Rule::FlagConflict), "flags {flags:#x}");
        }
    }

    #[test]
    fn test_validate_trust_set_limit() {
        let tx = TrustSet::new(xrp(10));
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::AmountKind));

        let tx = TrustSet::new(usd("-1", bob()));
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Range));

        let tx = TrustSet::new(usd("1", alice()));
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::SelfReference));
    }
}
