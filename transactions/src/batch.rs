//! Batch: several inner transactions submitted together under one of four
//! atomicity modes.
//!
//! Which inner transactions actually apply is decided by the network. This
//! module only guarantees that the envelope is well formed: the inner
//! transactions are unsigned and unique, exactly one mode is chosen, and
//! every participating account other than the submitter signs the batch.

use crate::common::{flags::TF_INNER_BATCH_TXN, Signer, TransactionCommon};
use crate::error::{Rule, TransactionError};
use crate::transaction::Transaction;
use crate::validation::{ensure, violation, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use xrpl_types::{params, Address, PublicKey, Signature, TransactionType};

pub mod flags {
    pub const TF_ALL_OR_NOTHING: u32 = 0x0001_0000;
    pub const TF_ONLY_ONE: u32 = 0x0002_0000;
    pub const TF_UNTIL_FAILURE: u32 = 0x0004_0000;
    pub const TF_INDEPENDENT: u32 = 0x0008_0000;

    pub const MODES: u32 = TF_ALL_OR_NOTHING | TF_ONLY_ONE | TF_UNTIL_FAILURE | TF_INDEPENDENT;
}

use flags::*;

/// `{"RawTransaction": {..}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "RawTransaction")]
    pub raw_transaction: Transaction,
}

/// `{"BatchSigner": {..}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSigner {
    #[serde(rename = "BatchSigner")]
    pub batch_signer: BatchSignerFields,
}

/// Signs either directly (key and signature) or through a nested
/// multi-signer list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchSignerFields {
    pub account: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signers: Option<Vec<Signer>>,
}

impl BatchSigner {
    pub fn single(account: Address, signing_pub_key: PublicKey, txn_signature: Signature) -> Self {
        Self {
            batch_signer: BatchSignerFields {
                account,
                signing_pub_key: Some(signing_pub_key),
                txn_signature: Some(txn_signature),
                signers: None,
            },
        }
    }

    pub fn multi(account: Address, signers: Vec<Signer>) -> Self {
        Self {
            batch_signer: BatchSignerFields {
                account,
                signing_pub_key: Some(PublicKey::MULTI_SIGN),
                txn_signature: None,
                signers: Some(signers),
            },
        }
    }

    pub fn account(&self) -> &Address {
        &self.batch_signer.account
    }

    pub fn signers(&self) -> &[Signer] {
        self.batch_signer.signers.as_deref().unwrap_or_default()
    }

    /// Every account this entry puts a signature from.
    fn signing_accounts(&self) -> impl Iterator<Item = &Address> {
        std::iter::once(self.account()).chain(self.signers().iter().map(Signer::account))
    }

    fn check_shape(&self) -> Result<(), TransactionError> {
        let fields = &self.batch_signer;
        let has_key = fields.signing_pub_key.as_ref().is_some_and(|k| !k.is_multi_sign());
        let has_signature = fields.txn_signature.as_ref().is_some_and(|s| !s.is_empty());
        let nested = !self.signers().is_empty();
        let account = &fields.account;
        if nested {
            ensure(
                !has_key && !has_signature,
                Rule::BatchSignerShape,
                format!("batch signer {account} has both a signature and a Signers list"),
            )
        } else {
            ensure(
                has_key && has_signature,
                Rule::BatchSignerShape,
                format!("batch signer {account} needs SigningPubKey and TxnSignature, or Signers"),
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Batch {
    pub raw_transactions: Vec<RawTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_signers: Option<Vec<BatchSigner>>,
}

impl Batch {
    pub fn new(inner: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            raw_transactions: inner
                .into_iter()
                .map(|raw_transaction| RawTransaction { raw_transaction })
                .collect(),
            batch_signers: None,
        }
    }

    pub fn with_signers(mut self, signers: Vec<BatchSigner>) -> Self {
        self.batch_signers = Some(signers);
        self
    }

    /// The flag inner transactions carry on the network. Exposed for
    /// callers; construction does not require it.
    pub fn inner_batch_flag() -> u32 {
        TF_INNER_BATCH_TXN
    }

    pub fn inner_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.raw_transactions.iter().map(|raw| &raw.raw_transaction)
    }

    pub fn batch_signers(&self) -> &[BatchSigner] {
        self.batch_signers.as_deref().unwrap_or_default()
    }

    /// Accounts that originate at least one inner transaction.
    pub fn participants(&self) -> HashSet<&Address> {
        self.inner_transactions().map(Transaction::account).collect()
    }

    /// Accounts that must sign the batch: every participant except the
    /// submitter.
    pub fn required_signers<'a>(&'a self, submitter: &Address) -> HashSet<&'a Address> {
        let mut accounts = self.participants();
        accounts.remove(submitter);
        accounts
    }

    fn check_inner(index: usize, inner: &Transaction) -> Result<(), TransactionError> {
        let common = inner.common();
        let fail = |what: &str| {
            violation(
                Rule::BatchInnerTransaction,
                format!("inner transaction {index} {what}"),
            )
        };
        if inner.transaction_type() == Some(TransactionType::Batch) {
            return Err(fail("is itself a Batch"));
        }
        if !common.fee().is_zero() {
            return Err(fail("must have a zero Fee"));
        }
        if !common.signing_pub_key.as_ref().is_some_and(PublicKey::is_multi_sign) {
            return Err(fail("must carry an empty SigningPubKey"));
        }
        if common.txn_signature.is_some() {
            return Err(fail("must not be signed"));
        }
        if common.signers.is_some() {
            return Err(fail("must not carry Signers"));
        }
        Ok(())
    }
}

impl Validate for Batch {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let count = self.raw_transactions.len();
        ensure(
            (params::MIN_BATCH_TRANSACTIONS..=params::MAX_BATCH_TRANSACTIONS).contains(&count),
            Rule::BatchSize,
            format!(
                "a batch holds {}..={} transactions, got {count}",
                params::MIN_BATCH_TRANSACTIONS,
                params::MAX_BATCH_TRANSACTIONS
            ),
        )?;

        let modes = (common.flags() & MODES).count_ones();
        ensure(
            modes == 1,
            Rule::BatchMode,
            format!("exactly one batch mode flag must be set, got {modes}"),
        )?;

        let inner: Vec<&Transaction> = self.inner_transactions().collect();
        for (index, transaction) in inner.iter().enumerate() {
            Self::check_inner(index, transaction)?;
        }
        for (i, a) in inner.iter().enumerate() {
            if let Some(j) = inner[i + 1..].iter().position(|b| a == b) {
                return Err(violation(
                    Rule::BatchDuplicate,
                    format!("inner transactions {i} and {} are identical", i + j + 1),
                ));
            }
        }

        let signers = self.batch_signers();
        for signer in signers {
            signer.check_shape()?;
            ensure(
                !signer.signing_accounts().any(|a| a == &common.account),
                Rule::BatchOuterSigner,
                format!("the submitter {} cannot sign its own batch", common.account),
            )?;
        }
        if signers.is_empty() {
            return Ok(());
        }

        ensure(
            signers.len() <= count,
            Rule::BatchSignerSet,
            format!("{} batch signers for {count} inner transactions", signers.len()),
        )?;
        let mut signed = HashSet::new();
        for signer in signers {
            ensure(
                signed.insert(signer.account()),
                Rule::BatchSignerSet,
                format!("{} signs the batch more than once", signer.account()),
            )?;
        }
        let required = self.required_signers(&common.account);
        if let Some(missing) = required.difference(&signed).next() {
            return Err(violation(
                Rule::BatchSignerSet,
                format!("participant {missing} has not signed the batch"),
            ));
        }
        if let Some(extra) = signed.difference(&required).next() {
            return Err(violation(
                Rule::BatchSignerSet,
                format!("{extra} signs the batch but sends none of its transactions"),
            ));
        }
        Ok(())
    }
}
