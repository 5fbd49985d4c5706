//! Automated market maker pools.
//!
//! Deposits and withdrawals pick a mode with a single flag. Each mode
//! requires a fixed set of the optional amount fields and forbids the rest.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{
    distinct_accounts, ensure, list_len, positive, unique, violation, Validate,
};
use serde::{Deserialize, Serialize};
use xrpl_ledger::AuthAccount;
use xrpl_types::{params, Address, CurrencyAmount, Issue};

pub mod flags {
    pub const TF_LP_TOKEN: u32 = 0x0001_0000;
    pub const TF_WITHDRAW_ALL: u32 = 0x0002_0000;
    pub const TF_ONE_ASSET_WITHDRAW_ALL: u32 = 0x0004_0000;
    pub const TF_SINGLE_ASSET: u32 = 0x0008_0000;
    pub const TF_TWO_ASSET: u32 = 0x0010_0000;
    pub const TF_ONE_ASSET_LP_TOKEN: u32 = 0x0020_0000;
    pub const TF_LIMIT_LP_TOKEN: u32 = 0x0040_0000;
    pub const TF_TWO_ASSET_IF_EMPTY: u32 = 0x0080_0000;

    // AMMClawback
    pub const TF_CLAW_TWO_ASSETS: u32 = 0x0000_0001;
}

use flags::*;

/// One row of a deposit or withdrawal mode matrix.
struct Mode {
    flag: u32,
    name: &'static str,
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

const DEPOSIT_MODES: &[Mode] = &[
    Mode {
        flag: TF_LP_TOKEN,
        name: "tfLPToken",
        required: &["LPTokenOut"],
        optional: &[],
    },
    Mode {
        flag: TF_SINGLE_ASSET,
        name: "tfSingleAsset",
        required: &["Amount"],
        optional: &[],
    },
    Mode {
        flag: TF_TWO_ASSET,
        name: "tfTwoAsset",
        required: &["Amount", "Amount2"],
        optional: &[],
    },
    Mode {
        flag: TF_ONE_ASSET_LP_TOKEN,
        name: "tfOneAssetLPToken",
        required: &["Amount", "LPTokenOut"],
        optional: &[],
    },
    Mode {
        flag: TF_LIMIT_LP_TOKEN,
        name: "tfLimitLPToken",
        required: &["Amount", "EPrice"],
        optional: &[],
    },
    Mode {
        flag: TF_TWO_ASSET_IF_EMPTY,
        name: "tfTwoAssetIfEmpty",
        required: &["Amount", "Amount2"],
        optional: &["TradingFee"],
    },
];

const WITHDRAW_MODES: &[Mode] = &[
    Mode {
        flag: TF_LP_TOKEN,
        name: "tfLPToken",
        required: &["LPTokenIn"],
        optional: &[],
    },
    Mode {
        flag: TF_WITHDRAW_ALL,
        name: "tfWithdrawAll",
        required: &[],
        optional: &[],
    },
    Mode {
        flag: TF_ONE_ASSET_WITHDRAW_ALL,
        name: "tfOneAssetWithdrawAll",
        required: &["Amount"],
        optional: &[],
    },
    Mode {
        flag: TF_SINGLE_ASSET,
        name: "tfSingleAsset",
        required: &["Amount"],
        optional: &[],
    },
    Mode {
        flag: TF_TWO_ASSET,
        name: "tfTwoAsset",
        required: &["Amount", "Amount2"],
        optional: &[],
    },
    Mode {
        flag: TF_ONE_ASSET_LP_TOKEN,
        name: "tfOneAssetLPToken",
        required: &["Amount", "LPTokenIn"],
        optional: &[],
    },
    Mode {
        flag: TF_LIMIT_LP_TOKEN,
        name: "tfLimitLPToken",
        required: &["Amount", "EPrice"],
        optional: &[],
    },
];

/// Exactly one mode flag may be set, and the present fields must match
/// what that mode requires and allows.
fn check_mode(
    transaction: &str,
    flags: u32,
    modes: &[Mode],
    present: &[(&str, bool)],
) -> Result<(), TransactionError> {
    let active: Vec<&Mode> = modes.iter().filter(|m| flags & m.flag != 0).collect();
    let [mode] = active.as_slice() else {
        return Err(violation(
            Rule::AmmMode,
            format!("{transaction} needs exactly one mode flag, {} set", active.len()),
        ));
    };

    for (field, set) in present {
        if mode.required.contains(field) {
            ensure(*set, Rule::AmmMode, format!("{} requires {field}", mode.name))?;
        } else if *set && !mode.optional.contains(field) {
            return Err(violation(
                Rule::AmmMode,
                format!("{field} is not allowed with {}", mode.name),
            ));
        }
    }
    Ok(())
}

fn trading_fee(fee: u16) -> Result<(), TransactionError> {
    ensure(
        fee <= params::MAX_AMM_TRADING_FEE,
        Rule::Range,
        format!("TradingFee {fee} exceeds {}", params::MAX_AMM_TRADING_FEE),
    )
}

fn distinct_assets(asset: &Issue, asset2: &Issue) -> Result<(), TransactionError> {
    ensure(asset != asset2, Rule::AmountKind, "Asset and Asset2 must differ")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmCreate {
    pub amount: CurrencyAmount,
    pub amount2: CurrencyAmount,
    pub trading_fee: u16,
}

impl Validate for AmmCreate {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        positive("Amount", &self.amount)?;
        positive("Amount2", &self.amount2)?;
        distinct_assets(&self.amount.issue(), &self.amount2.issue())?;
        trading_fee(self.trading_fee)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmDeposit {
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount2: Option<CurrencyAmount>,
    #[serde(rename = "EPrice", skip_serializing_if = "Option::is_none")]
    pub e_price: Option<CurrencyAmount>,
    #[serde(rename = "LPTokenOut", skip_serializing_if = "Option::is_none")]
    pub lp_token_out: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_fee: Option<u16>,
}

impl AmmDeposit {
    pub fn new(asset: Issue, asset2: Issue) -> Self {
        Self {
            asset,
            asset2,
            amount: None,
            amount2: None,
            e_price: None,
            lp_token_out: None,
            trading_fee: None,
        }
    }
}

impl Validate for AmmDeposit {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_assets(&self.asset, &self.asset2)?;
        check_mode(
            "AMMDeposit",
            common.flags(),
            DEPOSIT_MODES,
            &[
                ("Amount", self.amount.is_some()),
                ("Amount2", self.amount2.is_some()),
                ("EPrice", self.e_price.is_some()),
                ("LPTokenOut", self.lp_token_out.is_some()),
                ("TradingFee", self.trading_fee.is_some()),
            ],
        )?;
        for (field, amount) in [
            ("Amount", &self.amount),
            ("Amount2", &self.amount2),
            ("EPrice", &self.e_price),
            ("LPTokenOut", &self.lp_token_out),
        ] {
            if let Some(amount) = amount {
                positive(field, amount)?;
            }
        }
        if let Some(fee) = self.trading_fee {
            trading_fee(fee)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmWithdraw {
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount2: Option<CurrencyAmount>,
    #[serde(rename = "EPrice", skip_serializing_if = "Option::is_none")]
    pub e_price: Option<CurrencyAmount>,
    #[serde(rename = "LPTokenIn", skip_serializing_if = "Option::is_none")]
    pub lp_token_in: Option<CurrencyAmount>,
}

impl AmmWithdraw {
    pub fn new(asset: Issue, asset2: Issue) -> Self {
        Self {
            asset,
            asset2,
            amount: None,
            amount2: None,
            e_price: None,
            lp_token_in: None,
        }
    }
}

impl Validate for AmmWithdraw {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_assets(&self.asset, &self.asset2)?;
        check_mode(
            "AMMWithdraw",
            common.flags(),
            WITHDRAW_MODES,
            &[
                ("Amount", self.amount.is_some()),
                ("Amount2", self.amount2.is_some()),
                ("EPrice", self.e_price.is_some()),
                ("LPTokenIn", self.lp_token_in.is_some()),
            ],
        )?;
        for (field, amount) in [
            ("Amount", &self.amount),
            ("Amount2", &self.amount2),
            ("EPrice", &self.e_price),
            ("LPTokenIn", &self.lp_token_in),
        ] {
            if let Some(amount) = amount {
                positive(field, amount)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmVote {
    pub asset: Issue,
    pub asset2: Issue,
    pub trading_fee: u16,
}

impl Validate for AmmVote {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_assets(&self.asset, &self.asset2)?;
        trading_fee(self.trading_fee)
    }
}

/// Bid for the pool's discounted-fee auction slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmBid {
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_min: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_max: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_accounts: Option<Vec<AuthAccount>>,
}

impl Validate for AmmBid {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_assets(&self.asset, &self.asset2)?;
        for (field, bid) in [("BidMin", &self.bid_min), ("BidMax", &self.bid_max)] {
            if let Some(bid) = bid {
                positive(field, bid)?;
            }
        }
        if let Some(accounts) = &self.auth_accounts {
            list_len("AuthAccounts", accounts, 0, params::MAX_AMM_AUTH_ACCOUNTS)?;
            unique("AuthAccounts", accounts.iter().map(AuthAccount::account))?;
            for account in accounts {
                distinct_accounts("AuthAccount", account.account(), &common.account)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmDelete {
    pub asset: Issue,
    pub asset2: Issue,
}

impl Validate for AmmDelete {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_assets(&self.asset, &self.asset2)
    }
}

/// Claw back a holder's share of a pool, returned as the issuer's asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmmClawback {
    pub holder: Address,
    pub asset: Issue,
    pub asset2: Issue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CurrencyAmount>,
}

impl Validate for AmmClawback {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_accounts("Holder", &self.holder, &common.account)?;
        distinct_assets(&self.asset, &self.asset2)?;
        ensure(
            self.asset.issuer() == Some(&common.account),
            Rule::AmountKind,
            "Asset must be issued by Account",
        )?;
        if common.has_flag(TF_CLAW_TWO_ASSETS) {
            ensure(
                self.asset2.issuer() == Some(&common.account),
                Rule::FlagConflict,
                "tfClawTwoAssets requires Asset2 to be issued by Account",
            )?;
        }
        if let Some(amount) = &self.amount {
            positive("Amount", amount)?;
            ensure(
                amount.issue() == self.asset,
                Rule::AmountKind,
                "Amount must be denominated in Asset",
            )?;
        }
        Ok(())
    }
}
