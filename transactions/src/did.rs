//! Decentralized identifiers.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{ensure, max_bytes, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{params, HexBlob};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DidSet {
    #[serde(rename = "DIDDocument", skip_serializing_if = "Option::is_none")]
    pub did_document: Option<HexBlob>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HexBlob>,
}

impl Validate for DidSet {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        let fields = [
            ("DIDDocument", &self.did_document),
            ("URI", &self.uri),
            ("Data", &self.data),
        ];
        ensure(
            fields.iter().any(|(_, value)| value.is_some()),
            Rule::RequiredField,
            "at least one of DIDDocument, URI and Data is required",
        )?;
        // Present-but-empty fields delete; at least one must leave something behind.
        ensure(
            fields.iter().any(|(_, value)| value.as_ref().is_some_and(|v| !v.is_empty())),
            Rule::FieldLength,
            "DIDSet cannot empty every field",
        )?;
        for (field, value) in fields {
            if let Some(value) = value {
                max_bytes(field, value, params::MAX_DID_FIELD_BYTES)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DidDelete {}

impl Validate for DidDelete {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_validate_did_set() {
        let tx = DidSet {
            uri: Some(HexBlob::from_utf8("did:example:123")),
            ..DidSet::default()
        };
        assert!(tx.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_did_set_needs_a_field() {
        let err = DidSet::default().validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::RequiredField));

        let all_empty = DidSet {
            uri: Some(HexBlob::default()),
            data: Some(HexBlob::default()),
            ..DidSet::default()
        };
        let err = all_empty.validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::FieldLength));
    }

    #[test]
    fn test_validate_did_set_field_length() {
        let tx = DidSet {
            data: Some(HexBlob::from_bytes(&[0; 257])),
            ..DidSet::default()
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::FieldLength));
    }
}
