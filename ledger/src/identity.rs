//! Identity and attestation entries: credentials, DIDs, permissioned
//! domains and price oracles.

use crate::common::{EntryCommon, ZeroFlags};
use serde::{Deserialize, Serialize};
use xrpl_types::{Address, Currency, HexBlob, HexU64, RippleTime};

/// `Credential` flag bit: the subject has accepted the credential.
pub const LSF_ACCEPTED: u32 = 0x0001_0000;

/// An (issuer, credential type) pair as listed by deposit preauthorizations
/// and permissioned domains.
///
/// Wire shape: `{"Credential": {"Issuer": .., "CredentialType": ..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizeCredential {
    #[serde(rename = "Credential")]
    pub credential: CredentialId,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialId {
    pub issuer: Address,
    pub credential_type: HexBlob,
}

impl AuthorizeCredential {
    pub fn new(issuer: Address, credential_type: HexBlob) -> Self {
        Self {
            credential: CredentialId {
                issuer,
                credential_type,
            },
        }
    }

    pub fn issuer(&self) -> &Address {
        &self.credential.issuer
    }

    pub fn credential_type(&self) -> &HexBlob {
        &self.credential.credential_type
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credential {
    pub subject: Address,
    pub issuer: Address,
    pub credential_type: HexBlob,
    pub flags: u32,
    pub issuer_node: HexU64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_node: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

impl Credential {
    pub fn is_accepted(&self) -> bool {
        self.flags & LSF_ACCEPTED != 0
    }

    pub fn is_expired(&self, now: RippleTime) -> bool {
        self.expiration.is_some_and(|t| now > t)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Did {
    pub account: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    #[serde(rename = "DIDDocument", skip_serializing_if = "Option::is_none")]
    pub did_document: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HexBlob>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionedDomain {
    pub owner: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub sequence: u32,
    pub accepted_credentials: Vec<AuthorizeCredential>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

/// One price quote in an oracle's series.
///
/// Wire shape: `{"PriceData": {"BaseAsset": .., "QuoteAsset": .., ..}}`.
/// A quote without `AssetPrice` deletes the pair on update.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceData {
    #[serde(rename = "PriceData")]
    pub price_data: PriceDataFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceDataFields {
    pub base_asset: Currency,
    pub quote_asset: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_price: Option<HexU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
}

impl PriceData {
    pub fn new(base_asset: Currency, quote_asset: Currency) -> Self {
        Self {
            price_data: PriceDataFields {
                base_asset,
                quote_asset,
                asset_price: None,
                scale: None,
            },
        }
    }

    pub fn with_price(mut self, asset_price: u64, scale: u8) -> Self {
        self.price_data.asset_price = Some(HexU64::from(asset_price));
        self.price_data.scale = Some(scale);
        self
    }

    /// The (base, quote) pair; an oracle lists each pair at most once.
    pub fn pair(&self) -> (&Currency, &Currency) {
        (&self.price_data.base_asset, &self.price_data.quote_asset)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Oracle {
    pub owner: Address,
    pub flags: ZeroFlags,
    pub owner_node: HexU64,
    pub provider: HexBlob,
    pub asset_class: HexBlob,
    pub last_update_time: u32,
    pub price_data_series: Vec<PriceData>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    #[serde(rename = "OracleDocumentID", skip_serializing_if = "Option::is_none")]
    pub oracle_document_id: Option<u32>,
    #[serde(flatten)]
    pub common: EntryCommon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_acceptance_and_expiry() {
        let credential: Credential = serde_json::from_value(json!({
            "Subject": "rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW",
            "Issuer": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "CredentialType": "4B5943",
            "Flags": 65536,
            "IssuerNode": "0",
            "Expiration": 1000
        }))
        .unwrap();
        assert!(credential.is_accepted());
        assert!(!credential.is_expired(RippleTime::new(1000)));
        assert!(credential.is_expired(RippleTime::new(1001)));
    }

    #[test]
    fn oracle_price_series() {
        let raw = json!({
            "Owner": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "Flags": 0,
            "OwnerNode": "0",
            "Provider": "70726F7669646572",
            "AssetClass": "63757272656E6379",
            "LastUpdateTime": 1724871860,
            "PriceDataSeries": [
                {"PriceData": {"BaseAsset": "XRP", "QuoteAsset": "USD", "AssetPrice": "2E4", "Scale": 3}}
            ]
        });
        let oracle: Oracle = serde_json::from_value(raw.clone()).unwrap();
        let quote = &oracle.price_data_series[0];
        assert_eq!(quote.pair().0.as_str(), "XRP");
        assert_eq!(quote.price_data.asset_price.as_ref().map(HexU64::value), Some(0x2E4));
        assert_eq!(serde_json::to_value(&oracle).unwrap(), raw);
    }
}
