//! Price oracles.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{ensure, list_len, max_bytes, unique, Validate};
use serde::{Deserialize, Serialize};
use xrpl_ledger::PriceData;
use xrpl_types::{params, HexBlob};

/// Create or update an oracle. `Provider` and `AssetClass` are required on
/// creation and immutable afterwards; that distinction needs ledger state
/// and is left to the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OracleSet {
    #[serde(rename = "OracleDocumentID")]
    pub oracle_document_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<HexBlob>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<HexBlob>,
    /// Unix time of the last price update.
    pub last_update_time: u32,
    pub price_data_series: Vec<PriceData>,
}

impl Validate for OracleSet {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        list_len("PriceDataSeries", &self.price_data_series, 1, params::MAX_ORACLE_PRICE_DATA)?;
        let pairs: Vec<_> = self.price_data_series.iter().map(PriceData::pair).collect();
        unique("PriceDataSeries", &pairs)?;

        for entry in &self.price_data_series {
            let (base, quote) = entry.pair();
            ensure(
                base != quote,
                Rule::SelfReference,
                format!("price pair {base}/{quote} quotes an asset against itself"),
            )?;
            let fields = &entry.price_data;
            ensure(
                fields.asset_price.is_some() || fields.scale.is_none(),
                Rule::RequiredField,
                format!("Scale without AssetPrice for {base}/{quote}"),
            )?;
            if let Some(scale) = fields.scale {
                ensure(
                    scale <= params::MAX_ORACLE_SCALE,
                    Rule::Range,
                    format!("Scale {scale} exceeds {}", params::MAX_ORACLE_SCALE),
                )?;
            }
        }

        if let Some(provider) = &self.provider {
            max_bytes("Provider", provider, params::MAX_ORACLE_PROVIDER_BYTES)?;
        }
        if let Some(uri) = &self.uri {
            max_bytes("URI", uri, params::MAX_ORACLE_URI_BYTES)?;
        }
        if let Some(class) = &self.asset_class {
            max_bytes("AssetClass", class, params::MAX_ORACLE_ASSET_CLASS_BYTES)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OracleDelete {
    #[serde(rename = "OracleDocumentID")]
    pub oracle_document_id: u32,
}

impl Validate for OracleDelete {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use xrpl_types::Currency;

    fn pair(base: &str, quote: &str) -> PriceData {
        PriceData::new(Currency::new(base).unwrap(), Currency::new(quote).unwrap())
    }

    fn oracle(series: Vec<PriceData>) -> OracleSet {
        OracleSet {
            oracle_document_id: 1,
            provider: Some(HexBlob::from_utf8("chainlink")),
            uri: None,
            asset_class: Some(HexBlob::from_utf8("currency")),
            last_update_time: 1_700_000_000,
            price_data_series: series,
        }
    }

    #[test]
    fn test_validate_oracle_set() {
        let tx = oracle(vec![pair("XRP", "USD").with_price(740, 3), pair("BTC", "USD")]);
        assert!(tx.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_oracle_series_length() {
        let err = oracle(Vec::new()).validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::ListLength));

        let codes = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH", "III", "JJJ", "KKK"];
        let series = codes.iter().map(|c| pair(c, "USD")).collect();
        let err = oracle(series).validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::ListLength));
    }

    #[test]
    fn test_validate_oracle_duplicate_pair() {
        let tx = oracle(vec![pair("XRP", "USD"), pair("XRP", "USD").with_price(1, 0)]);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Duplicate));
    }

    #[test]
    fn test_validate_oracle_scale_and_class() {
        let tx = oracle(vec![pair("XRP", "USD").with_price(1, 11)]);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Range));

        let mut tx = oracle(vec![pair("XRP", "USD")]);
        tx.asset_class = Some(HexBlob::from_utf8("a much too long asset class"));
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::FieldLength));
    }
}
