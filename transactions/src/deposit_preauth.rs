//! Deposit preauthorization, by account or by credential set.

use crate::common::TransactionCommon;
use crate::error::TransactionError;
use crate::validation::{byte_range, distinct_accounts, exactly_one, list_len, unique, Validate};
use serde::{Deserialize, Serialize};
use xrpl_ledger::AuthorizeCredential;
use xrpl_types::{params, Address};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositPreauth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unauthorize: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_credentials: Option<Vec<AuthorizeCredential>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unauthorize_credentials: Option<Vec<AuthorizeCredential>>,
}

impl DepositPreauth {
    pub fn authorize(account: Address) -> Self {
        Self {
            authorize: Some(account),
            ..Self::default()
        }
    }

    pub fn unauthorize(account: Address) -> Self {
        Self {
            unauthorize: Some(account),
            ..Self::default()
        }
    }
}

/// A credential list as used by preauthorization and permissioned domains.
pub(crate) fn credential_set(
    field: &str,
    credentials: &[AuthorizeCredential],
    max: usize,
) -> Result<(), TransactionError> {
    list_len(field, credentials, 1, max)?;
    unique(field, credentials)?;
    for credential in credentials {
        byte_range(
            "CredentialType",
            credential.credential_type(),
            1,
            params::MAX_CREDENTIAL_TYPE_BYTES,
        )?;
    }
    Ok(())
}

impl Validate for DepositPreauth {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        exactly_one(&[
            ("Authorize", self.authorize.is_some()),
            ("Unauthorize", self.unauthorize.is_some()),
            ("AuthorizeCredentials", self.authorize_credentials.is_some()),
            ("UnauthorizeCredentials", self.unauthorize_credentials.is_some()),
        ])?;

        if let Some(account) = &self.authorize {
            distinct_accounts("Authorize", account, &common.account)?;
        }
        if let Some(account) = &self.unauthorize {
            distinct_accounts("Unauthorize", account, &common.account)?;
        }
        if let Some(credentials) = &self.authorize_credentials {
            credential_set("AuthorizeCredentials", credentials, params::MAX_PREAUTH_CREDENTIALS)?;
        }
        if let Some(credentials) = &self.unauthorize_credentials {
            credential_set("UnauthorizeCredentials", credentials, params::MAX_PREAUTH_CREDENTIALS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;
    use crate::test_support::*;
    use xrpl_types::HexBlob;

    fn kyc(issuer: Address) -> AuthorizeCredential {
        AuthorizeCredential::new(issuer, HexBlob::from_utf8("KYC"))
    }

    #[test]
    fn test_validate_deposit_preauth_exactly_one() {
        assert!(DepositPreauth::authorize(bob()).validate(&common(alice())).is_ok());
        assert!(DepositPreauth::unauthorize(bob()).validate(&common(alice())).is_ok());

        let both = DepositPreauth {
            unauthorize: Some(carol()),
            ..DepositPreauth::authorize(bob())
        };
        assert_eq!(
            both.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::MutuallyExclusive)
        );
        assert_eq!(
            DepositPreauth::default().validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::MutuallyExclusive)
        );
    }

    #[test]
    fn test_validate_deposit_preauth_self() {
        let err = DepositPreauth::authorize(alice()).validate(&common(alice())).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::SelfReference));
    }

    #[test]
    fn test_validate_deposit_preauth_credentials() {
        let mut tx = DepositPreauth {
            authorize_credentials: Some(vec![kyc(bob()), kyc(carol())]),
            ..DepositPreauth::default()
        };
        assert!(tx.validate(&common(alice())).is_ok());

        tx.authorize_credentials = Some(vec![kyc(bob()), kyc(bob())]);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Duplicate));

        tx.authorize_credentials = Some(vec![kyc(bob()); 9]);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::ListLength));

        tx.authorize_credentials = Some(vec![AuthorizeCredential::new(bob(), HexBlob::default())]);
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::FieldLength));
    }
}
