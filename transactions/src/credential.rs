//! Credentials and the permissioned domains that accept them.

use crate::common::TransactionCommon;
use crate::deposit_preauth::credential_set;
use crate::error::{Rule, TransactionError};
use crate::validation::{byte_range, ensure, Validate};
use serde::{Deserialize, Serialize};
use xrpl_ledger::AuthorizeCredential;
use xrpl_types::{params, Address, Hash256, HexBlob, RippleTime};

fn credential_type(value: &HexBlob) -> Result<(), TransactionError> {
    byte_range("CredentialType", value, 1, params::MAX_CREDENTIAL_TYPE_BYTES)
}

/// Issue a credential to a subject; it takes effect once accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialCreate {
    pub subject: Address,
    pub credential_type: HexBlob,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<RippleTime>,
    #[serde(rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<HexBlob>,
}

impl Validate for CredentialCreate {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        credential_type(&self.credential_type)?;
        if let Some(uri) = &self.uri {
            byte_range("URI", uri, 1, params::MAX_URI_BYTES)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialAccept {
    pub issuer: Address,
    pub credential_type: HexBlob,
}

impl Validate for CredentialAccept {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        credential_type(&self.credential_type)
    }
}

/// Delete a credential. The sender is implied as whichever of subject or
/// issuer is left out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialDelete {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Address>,
    pub credential_type: HexBlob,
}

impl Validate for CredentialDelete {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        ensure(
            self.subject.is_some() || self.issuer.is_some(),
            Rule::RequiredField,
            "at least one of Subject and Issuer is required",
        )?;
        credential_type(&self.credential_type)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionedDomainSet {
    /// Absent when creating a new domain.
    #[serde(rename = "DomainID", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Hash256>,
    pub accepted_credentials: Vec<AuthorizeCredential>,
}

impl Validate for PermissionedDomainSet {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        credential_set(
            "AcceptedCredentials",
            &self.accepted_credentials,
            params::MAX_DOMAIN_CREDENTIALS,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermissionedDomainDelete {
    #[serde(rename = "DomainID")]
    pub domain_id: Hash256,
}

impl Validate for PermissionedDomainDelete {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        Ok(())
    }
}

impl CredentialCreate {
    pub fn new(subject: Address, credential_type: HexBlob) -> Self {
        Self {
            subject,
            credential_type,
            expiration: None,
            uri: None,
        }
    }

    /// Subject and issuer coincide.
    pub fn is_self_issued(&self, common: &TransactionCommon) -> bool {
        self.subject == common.account
    }
}

impl CredentialDelete {
    /// Deletion sent by the subject; the sender fills in `Subject`.
    pub fn by_subject(issuer: Address, credential_type: HexBlob) -> Self {
        Self {
            subject: None,
            issuer: Some(issuer),
            credential_type,
        }
    }

    /// Deletion sent by the issuer.
    pub fn by_issuer(subject: Address, credential_type: HexBlob) -> Self {
        Self {
            subject: Some(subject),
            issuer: None,
            credential_type,
        }
    }

    /// Whether `account` is a party to the credential. A missing side
    /// defaults to the sender.
    pub fn involves(&self, account: &Address) -> bool {
        self.subject.as_ref().map_or(true, |s| s == account)
            || self.issuer.as_ref().map_or(true, |i| i == account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn kyc() -> HexBlob {
        HexBlob::from_utf8("KYC")
    }

    #[test]
    fn test_validate_credential_type_length() {
        let tx = CredentialCreate::new(bob(), kyc());
        assert!(tx.validate(&common(alice())).is_ok());
        assert!(!tx.is_self_issued(&common(alice())));

        let empty = CredentialCreate::new(bob(), HexBlob::default());
        let err = empty.validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::FieldLength));

        let long = CredentialAccept {
            issuer: alice(),
            credential_type: HexBlob::from_bytes(&[0x41; 65]),
        };
        assert_eq!(long.validate(&common(bob())).unwrap_err().rule(), Some(Rule::FieldLength));
    }

    #[test]
    fn test_validate_credential_delete_parties() {
        let neither = CredentialDelete {
            subject: None,
            issuer: None,
            credential_type: kyc(),
        };
        let err = neither.validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::RequiredField));

        assert!(CredentialDelete::by_subject(alice(), kyc()).validate(&common(bob())).is_ok());
        let both = CredentialDelete {
            subject: Some(bob()),
            issuer: Some(alice()),
            credential_type: kyc(),
        };
        assert!(both.validate(&common(carol())).is_ok());
        assert!(!both.involves(&carol()));
        assert!(both.involves(&bob()));
    }

    #[test]
    fn test_validate_permissioned_domain() {
        let creds = |n: usize| {
            (0..n)
                .map(|i| AuthorizeCredential::new(bob(), HexBlob::from_bytes(&[i as u8 + 1])))
                .collect::<Vec<_>>()
        };
        let mut tx = PermissionedDomainSet {
            domain_id: None,
            accepted_credentials: creds(10),
        };
        assert!(tx.validate(&common(alice())).is_ok());

        tx.accepted_credentials = creds(11);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::ListLength));

        tx.accepted_credentials = Vec::new();
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::ListLength));
    }
}
