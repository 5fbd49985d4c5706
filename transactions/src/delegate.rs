//! DelegateSet: grant another account permission to send transactions on
//! the sender's behalf.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{distinct_accounts, ensure, unique, Validate};
use serde::{Deserialize, Serialize};
use xrpl_types::{params, Address, Permission, PermissionValue};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DelegateSet {
    pub authorize: Address,
    /// Replaces the whole grant; an empty list revokes it.
    pub permissions: Vec<Permission>,
}

impl DelegateSet {
    pub fn new(authorize: Address, values: impl IntoIterator<Item = PermissionValue>) -> Self {
        Self {
            authorize,
            permissions: values.into_iter().map(Permission::new).collect(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = PermissionValue> + '_ {
        self.permissions.iter().map(Permission::value)
    }
}

impl Validate for DelegateSet {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_accounts("Authorize", &self.authorize, &common.account)?;
        ensure(
            self.permissions.len() <= params::MAX_DELEGATE_PERMISSIONS,
            Rule::ListLength,
            format!(
                "Permissions holds {} entries, maximum is {}",
                self.permissions.len(),
                params::MAX_DELEGATE_PERMISSIONS
            ),
        )?;
        let values: Vec<PermissionValue> = self.values().collect();
        unique("Permissions", &values)?;
        for value in values {
            ensure(
                value.is_delegable(),
                Rule::NotDelegable,
                format!("{value} cannot be delegated"),
            )?;
        }
        Ok(())
    }
}
