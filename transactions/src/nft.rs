//! Non-fungible tokens: minting, burning, offers and modification.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{
    byte_range, distinct_accounts, ensure, forbidden, list_len, positive, required, unique,
    violation, Validate,
};
use serde::{Deserialize, Serialize};
use xrpl_types::{params, Address, CurrencyAmount, Hash256, HexBlob, RippleTime};

pub mod flags {
    // NFTokenMint
    pub const TF_BURNABLE: u32 = 0x0000_0001;
    pub const TF_ONLY_XRP: u32 = 0x0000_0002;
    pub const TF_TRUSTLINE: u32 = 0x0000_0004;
    pub const TF_TRANSFERABLE: u32 = 0x0000_0008;
    pub const TF_MUTABLE: u32 = 0x0000_0010;

    // NFTokenCreateOffer
    pub const TF_SELL_NFTOKEN: u32 = 0x0000_0001;
}

use flags::*;

fn uri(field: &str, uri: &HexBlob) -> Result<(), TransactionError> {
    byte_range(field, uri, 1, params::MAX_URI_BYTES)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenMint {
    #[serde(rename = "NFTokenTaxon")]
    pub nftoken_taxon: u32,
    /// Minting on behalf of another account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u16>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    /// Mint and offer in one step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
}

impl NfTokenMint {
    pub fn new(nftoken_taxon: u32) -> Self {
        Self {
            nftoken_taxon,
            issuer: None,
            transfer_fee: None,
            uri: None,
            amount: None,
            destination: None,
            expiration: None,
        }
    }
}

impl Validate for NfTokenMint {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        if let Some(fee) = self.transfer_fee {
            ensure(
                fee <= params::MAX_TRANSFER_FEE,
                Rule::Range,
                format!("TransferFee {fee} exceeds {}", params::MAX_TRANSFER_FEE),
            )?;
            ensure(
                fee == 0 || common.has_flag(TF_TRANSFERABLE),
                Rule::FlagConflict,
                "a non-zero TransferFee requires tfTransferable",
            )?;
        }
        if let Some(issuer) = &self.issuer {
            distinct_accounts("Issuer", issuer, &common.account)?;
        }
        if let Some(value) = &self.uri {
            uri("URI", value)?;
        }
        if self.amount.is_none() {
            forbidden("Destination", self.destination.as_ref(), "without Amount")?;
            forbidden("Expiration", self.expiration.as_ref(), "without Amount")?;
        }
        if let Some(destination) = &self.destination {
            distinct_accounts("Destination", destination, &common.account)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenBurn {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Hash256,
    /// The holder, when an issuer burns a token it no longer holds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
}

impl Validate for NfTokenBurn {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenCreateOffer {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Hash256,
    pub amount: CurrencyAmount,
    /// The current holder; set on buy offers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
}

impl NfTokenCreateOffer {
    pub fn sell(nftoken_id: Hash256, amount: CurrencyAmount) -> Self {
        Self {
            nftoken_id,
            amount,
            owner: None,
            destination: None,
            expiration: None,
        }
    }

    pub fn buy(nftoken_id: Hash256, amount: CurrencyAmount, owner: Address) -> Self {
        Self {
            owner: Some(owner),
            ..Self::sell(nftoken_id, amount)
        }
    }
}

impl Validate for NfTokenCreateOffer {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        if common.has_flag(TF_SELL_NFTOKEN) {
            forbidden("Owner", self.owner.as_ref(), "on a sell offer")?;
            ensure(!self.amount.is_negative(), Rule::Range, "Amount cannot be negative")?;
        } else {
            required("Owner", self.owner.as_ref())?;
            positive("Amount", &self.amount)?;
        }
        if let Some(owner) = &self.owner {
            distinct_accounts("Owner", owner, &common.account)?;
        }
        if let Some(destination) = &self.destination {
            distinct_accounts("Destination", destination, &common.account)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NfTokenCancelOffer {
    #[serde(rename = "NFTokenOffers")]
    pub nftoken_offers: Vec<Hash256>,
}

impl Validate for NfTokenCancelOffer {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        list_len("NFTokenOffers", &self.nftoken_offers, 1, usize::MAX)?;
        unique("NFTokenOffers", &self.nftoken_offers)
    }
}

/// Accept one offer directly, or match a buy and a sell offer as a broker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NfTokenAcceptOffer {
    #[serde(rename = "NFTokenBuyOffer", skip_serializing_if = "Option::is_none")]
    pub nftoken_buy_offer: Option<Hash256>,
    #[serde(rename = "NFTokenSellOffer", skip_serializing_if = "Option::is_none")]
    pub nftoken_sell_offer: Option<Hash256>,
    #[serde(rename = "NFTokenBrokerFee", skip_serializing_if = "Option::is_none")]
    pub nftoken_broker_fee: Option<CurrencyAmount>,
}

impl NfTokenAcceptOffer {
    pub fn is_brokered(&self) -> bool {
        self.nftoken_buy_offer.is_some() && self.nftoken_sell_offer.is_some()
    }
}

impl Validate for NfTokenAcceptOffer {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        match (&self.nftoken_buy_offer, &self.nftoken_sell_offer) {
            (None, None) => Err(violation(
                Rule::NftOfferMode,
                "one of NFTokenBuyOffer and NFTokenSellOffer is required",
            )),
            (Some(_), Some(_)) => match &self.nftoken_broker_fee {
                Some(fee) => positive("NFTokenBrokerFee", fee),
                None => Ok(()),
            },
            (Some(_), None) | (None, Some(_)) => ensure(
                self.nftoken_broker_fee.is_none(),
                Rule::NftOfferMode,
                "NFTokenBrokerFee is only allowed when brokering a buy and a sell offer",
            ),
        }
    }
}

/// Change the URI of a token minted with `tfMutable`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenModify {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Hash256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    /// Absent to clear the URI.
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
}

impl Validate for NfTokenModify {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        if let Some(owner) = &self.owner {
            distinct_accounts("Owner", owner, &common.account)?;
        }
        if let Some(value) = &self.uri {
            uri("URI", value)?;
        }
        Ok(())
    }
}
