//! Validation plumbing: the shared envelope checks and the small rule
//! helpers every per-type validator is written with.
//!
//! Validation is stateless. Checks that need ledger state (balances,
//! reserves, existing trust lines) belong to the network.

use crate::common::{TransactionCommon, ENVELOPE_FIELDS};
use crate::error::{Rule, TransactionError};
use std::collections::HashSet;
use std::hash::Hash;
use xrpl_types::{params, Address, CurrencyAmount, Hash256, HexBlob};

/// Per-type checks, run after the envelope checks have passed.
pub trait Validate {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError>;
}

pub(crate) fn violation(rule: Rule, detail: impl Into<String>) -> TransactionError {
    TransactionError::Invariant {
        rule,
        detail: detail.into(),
    }
}

pub(crate) fn ensure(
    condition: bool,
    rule: Rule,
    detail: impl Into<String>,
) -> Result<(), TransactionError> {
    if condition {
        Ok(())
    } else {
        Err(violation(rule, detail))
    }
}

/// Exactly one of the named fields must be present.
pub(crate) fn exactly_one(fields: &[(&str, bool)]) -> Result<(), TransactionError> {
    let present = fields.iter().filter(|(_, set)| *set).count();
    ensure(
        present == 1,
        Rule::MutuallyExclusive,
        format!("exactly one of {} is required, {present} given", names(fields)),
    )
}

fn names(fields: &[(&str, bool)]) -> String {
    fields
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn required<T>(field: &str, value: Option<&T>) -> Result<(), TransactionError> {
    ensure(value.is_some(), Rule::RequiredField, format!("{field} is required"))
}

pub(crate) fn forbidden<T>(
    field: &str,
    value: Option<&T>,
    why: &str,
) -> Result<(), TransactionError> {
    ensure(value.is_none(), Rule::ForbiddenField, format!("{field} is not allowed {why}"))
}

pub(crate) fn distinct_accounts(
    field: &str,
    value: &Address,
    account: &Address,
) -> Result<(), TransactionError> {
    ensure(
        value != account,
        Rule::SelfReference,
        format!("{field} must differ from Account {account}"),
    )
}

pub(crate) fn positive(field: &str, amount: &CurrencyAmount) -> Result<(), TransactionError> {
    ensure(
        amount.is_positive(),
        Rule::PositiveAmount,
        format!("{field} must be positive"),
    )
}

pub(crate) fn max_bytes(field: &str, blob: &HexBlob, max: usize) -> Result<(), TransactionError> {
    ensure(
        blob.byte_len() <= max,
        Rule::FieldLength,
        format!("{field} is {} bytes, maximum is {max}", blob.byte_len()),
    )
}

pub(crate) fn byte_range(
    field: &str,
    blob: &HexBlob,
    min: usize,
    max: usize,
) -> Result<(), TransactionError> {
    ensure(
        (min..=max).contains(&blob.byte_len()),
        Rule::FieldLength,
        format!("{field} must be {min}..={max} bytes, got {}", blob.byte_len()),
    )
}

pub(crate) fn list_len<T>(
    field: &str,
    list: &[T],
    min: usize,
    max: usize,
) -> Result<(), TransactionError> {
    ensure(
        (min..=max).contains(&list.len()),
        Rule::ListLength,
        format!("{field} must hold {min}..={max} entries, got {}", list.len()),
    )
}

pub(crate) fn unique<'a, T, I>(field: &str, items: I) -> Result<(), TransactionError>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(violation(Rule::Duplicate, format!("{field} contains duplicate entries")));
        }
    }
    Ok(())
}

/// `CredentialIDs`: 1..=8 distinct credential entry ids.
pub(crate) fn credential_ids(ids: &[Hash256]) -> Result<(), TransactionError> {
    list_len("CredentialIDs", ids, 1, params::MAX_PREAUTH_CREDENTIALS)?;
    unique("CredentialIDs", ids)
}

/// Two flags that undo each other may not both be set.
pub(crate) fn flag_pair(
    flags: u32,
    set: u32,
    clear: u32,
    what: &str,
) -> Result<(), TransactionError> {
    ensure(
        flags & set == 0 || flags & clear == 0,
        Rule::FlagConflict,
        format!("cannot both set and clear {what}"),
    )
}

/// Envelope checks shared by every transaction type, run before the
/// per-type checks.
pub fn validate_common(common: &TransactionCommon) -> Result<(), TransactionError> {
    // Core fields may not be double-set through the pass-through channel.
    for key in ENVELOPE_FIELDS {
        ensure(
            !common.unknown_fields.contains_key(*key),
            Rule::ReservedField,
            format!("{key} may not be supplied as an unrecognised field"),
        )?;
    }

    if common.ticket_sequence.is_some() {
        ensure(
            common.sequence.unwrap_or(0) == 0,
            Rule::TicketSequence,
            "Sequence must be 0 when TicketSequence is used",
        )?;
    }

    if let Some(delegate) = &common.delegate {
        ensure(
            delegate != &common.account,
            Rule::SelfDelegation,
            "Delegate must differ from Account",
        )?;
    }

    if let Some(memos) = &common.memos {
        for memo in memos {
            ensure(!memo.is_empty(), Rule::MemoShape, "a Memo must carry at least one field")?;
        }
    }

    if let Some(signers) = &common.signers {
        ensure(
            (1..=params::MAX_SIGNER_ENTRIES).contains(&signers.len()),
            Rule::SignerList,
            format!(
                "Signers must hold 1..={} entries, got {}",
                params::MAX_SIGNER_ENTRIES,
                signers.len()
            ),
        )?;
        unique("Signers", signers.iter().map(|s| s.account()))?;
    }

    Ok(())
}
