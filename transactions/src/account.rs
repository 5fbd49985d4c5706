//! Account management: settings, keys, signer lists, tickets, deletion.

use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::validation::{
    credential_ids, distinct_accounts, ensure, flag_pair, forbidden, list_len, max_bytes,
    required, unique, violation, Validate,
};
use serde::{Deserialize, Serialize};
use xrpl_ledger::SignerEntry;
use xrpl_types::{params, Address, Hash128, Hash256, HexBlob, PublicKey};

/// `AccountSet` transaction flags and `SetFlag`/`ClearFlag` values.
pub mod flags {
    pub const TF_REQUIRE_DEST_TAG: u32 = 0x0001_0000;
    pub const TF_OPTIONAL_DEST_TAG: u32 = 0x0002_0000;
    pub const TF_REQUIRE_AUTH: u32 = 0x0004_0000;
    pub const TF_OPTIONAL_AUTH: u32 = 0x0008_0000;
    pub const TF_DISALLOW_XRP: u32 = 0x0010_0000;
    pub const TF_ALLOW_XRP: u32 = 0x0020_0000;

    pub const ASF_REQUIRE_DEST: u32 = 1;
    pub const ASF_REQUIRE_AUTH: u32 = 2;
    pub const ASF_DISALLOW_XRP: u32 = 3;
    pub const ASF_DISABLE_MASTER: u32 = 4;
    pub const ASF_ACCOUNT_TXN_ID: u32 = 5;
    pub const ASF_NO_FREEZE: u32 = 6;
    pub const ASF_GLOBAL_FREEZE: u32 = 7;
    pub const ASF_DEFAULT_RIPPLE: u32 = 8;
    pub const ASF_DEPOSIT_AUTH: u32 = 9;
    pub const ASF_AUTHORIZED_NFTOKEN_MINTER: u32 = 10;
    pub const ASF_DISALLOW_INCOMING_NFTOKEN_OFFER: u32 = 12;
    pub const ASF_DISALLOW_INCOMING_CHECK: u32 = 13;
    pub const ASF_DISALLOW_INCOMING_PAY_CHAN: u32 = 14;
    pub const ASF_DISALLOW_INCOMING_TRUSTLINE: u32 = 15;
    pub const ASF_ALLOW_TRUSTLINE_CLAWBACK: u32 = 16;
    pub const ASF_ALLOW_TRUSTLINE_LOCKING: u32 = 17;
}

use flags::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,
    /// Empty to clear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<Hash128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<Hash256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_size: Option<u32>,
    #[serde(rename = "NFTokenMinter", skip_serializing_if = "Option::is_none")]
    pub nftoken_minter: Option<Address>,
}

impl Validate for AccountSet {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        if let (Some(set), Some(clear)) = (self.set_flag, self.clear_flag) {
            ensure(
                set != clear,
                Rule::FlagConflict,
                format!("SetFlag and ClearFlag are both {set}"),
            )?;
        }

        let flags = common.flags();
        flag_pair(flags, TF_REQUIRE_DEST_TAG, TF_OPTIONAL_DEST_TAG, "RequireDestTag")?;
        flag_pair(flags, TF_REQUIRE_AUTH, TF_OPTIONAL_AUTH, "RequireAuth")?;
        flag_pair(flags, TF_DISALLOW_XRP, TF_ALLOW_XRP, "DisallowXRP")?;

        if let Some(rate) = self.transfer_rate {
            let bounds = params::MIN_TRANSFER_RATE..=params::MAX_TRANSFER_RATE;
            ensure(
                rate == 0 || bounds.contains(&rate),
                Rule::Range,
                format!(
                    "TransferRate {rate} must be 0 or within {}..={}",
                    params::MIN_TRANSFER_RATE,
                    params::MAX_TRANSFER_RATE
                ),
            )?;
        }
        if let Some(tick) = self.tick_size {
            ensure(
                tick == 0 || (params::MIN_TICK_SIZE..=params::MAX_TICK_SIZE).contains(&tick),
                Rule::Range,
                format!(
                    "TickSize {tick} must be 0 or within {}..={}",
                    params::MIN_TICK_SIZE,
                    params::MAX_TICK_SIZE
                ),
            )?;
        }
        if let Some(domain) = &self.domain {
            max_bytes("Domain", domain, 256)?;
        }

        if self.set_flag == Some(ASF_AUTHORIZED_NFTOKEN_MINTER) {
            required("NFTokenMinter", self.nftoken_minter.as_ref())?;
        }
        if self.clear_flag == Some(ASF_AUTHORIZED_NFTOKEN_MINTER) {
            forbidden("NFTokenMinter", self.nftoken_minter.as_ref(), "while clearing the minter")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetRegularKey {
    /// Absent to remove the regular key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_key: Option<Address>,
}

impl Validate for SetRegularKey {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        match &self.regular_key {
            Some(key) => distinct_accounts("RegularKey", key, &common.account),
            None => Ok(()),
        }
    }
}

/// Replace or (with quorum 0) delete the account's multi-signing list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerListSet {
    pub signer_quorum: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_entries: Option<Vec<SignerEntry>>,
}

impl SignerListSet {
    pub fn new(signer_quorum: u32, signer_entries: Vec<SignerEntry>) -> Self {
        Self {
            signer_quorum,
            signer_entries: Some(signer_entries),
        }
    }

    /// The form that removes the list.
    pub fn delete() -> Self {
        Self {
            signer_quorum: 0,
            signer_entries: None,
        }
    }
}

impl Validate for SignerListSet {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        let entries = self.signer_entries.as_deref().unwrap_or_default();
        if self.signer_quorum == 0 {
            return ensure(
                entries.is_empty(),
                Rule::Quorum,
                "SignerEntries must be empty when SignerQuorum is 0",
            );
        }

        list_len("SignerEntries", entries, 1, params::MAX_SIGNER_ENTRIES)?;
        unique("SignerEntries", entries.iter().map(SignerEntry::account))?;

        let mut total = 0u32;
        for entry in entries {
            distinct_accounts("SignerEntry", entry.account(), &common.account)?;
            ensure(
                entry.weight() > 0,
                Rule::Range,
                format!("SignerWeight for {} must be positive", entry.account()),
            )?;
            total += u32::from(entry.weight());
        }
        ensure(
            total >= self.signer_quorum,
            Rule::Quorum,
            format!("SignerQuorum {} exceeds total weight {total}", self.signer_quorum),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountDelete {
    pub destination: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "CredentialIDs", skip_serializing_if = "Option::is_none")]
    pub credential_ids: Option<Vec<Hash256>>,
}

impl Validate for AccountDelete {
    fn validate(&self, common: &TransactionCommon) -> Result<(), TransactionError> {
        distinct_accounts("Destination", &self.destination, &common.account)?;
        if let Some(ids) = &self.credential_ids {
            credential_ids(ids)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TicketCreate {
    pub ticket_count: u32,
}

impl Validate for TicketCreate {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        ensure(
            (1..=params::MAX_TICKETS_PER_TRANSACTION).contains(&self.ticket_count),
            Rule::Range,
            format!(
                "TicketCount must be 1..={}, got {}",
                params::MAX_TICKETS_PER_TRANSACTION,
                self.ticket_count
            ),
        )
    }
}

/// Repair a corrupted piece of ledger state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerStateFix {
    pub ledger_fix_type: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
}

impl LedgerStateFix {
    /// Relink an owner's NFToken directory pages.
    pub const NFTOKEN_PAGE_LINK: u16 = 1;
}

impl Validate for LedgerStateFix {
    fn validate(&self, _common: &TransactionCommon) -> Result<(), TransactionError> {
        match self.ledger_fix_type {
            Self::NFTOKEN_PAGE_LINK => required("Owner", self.owner.as_ref()),
            other => Err(violation(Rule::Range, format!("unknown LedgerFixType {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_validate_transfer_rate() {
        for (rate, ok) in [
            (0, true),
            (1_000_000_000, true),
            (1_500_000_000, true),
            (2_000_000_000, true),
            (999_999_999, false),
            (2_000_000_001, false),
            (1, false),
        ] {
            let tx = AccountSet {
                transfer_rate: Some(rate),
                ..Default::default()
            };
            assert_eq!(tx.validate(&common(alice())).is_ok(), ok, "rate {rate}");
        }
    }

    #[test]
    fn test_validate_tick_size() {
        for (tick, ok) in [(0, true), (3, true), (15, true), (2, false), (16, false)] {
            let tx = AccountSet {
                tick_size: Some(tick),
                ..Default::default()
            };
            assert_eq!(tx.validate(&common(alice())).is_ok(), ok, "tick {tick}");
        }
    }

    #[test]
    fn test_validate_set_and_clear_same_flag() {
        let tx = AccountSet {
            set_flag: Some(ASF_REQUIRE_DEST),
            clear_flag: Some(ASF_REQUIRE_DEST),
            ..Default::default()
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::FlagConflict));
    }

    #[test]
    fn test_validate_conflicting_tf_flags() {
        let tx = AccountSet::default();
        let err = tx
            .validate(&with_flags(alice(), TF_REQUIRE_AUTH | TF_OPTIONAL_AUTH))
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::FlagConflict));
        assert!(tx.validate(&with_flags(alice(), TF_REQUIRE_AUTH | TF_ALLOW_XRP)).is_ok());
    }

    #[test]
    fn test_validate_nftoken_minter_flag() {
        let mut tx = AccountSet {
            set_flag: Some(ASF_AUTHORIZED_NFTOKEN_MINTER),
            ..Default::default()
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::RequiredField));
        tx.nftoken_minter = Some(bob());
        assert!(tx.validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_regular_key_self() {
        let tx = SetRegularKey {
            regular_key: Some(alice()),
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::SelfReference));
        assert!(SetRegularKey::default().validate(&common(alice())).is_ok());
    }

    #[test]
    fn test_validate_signer_list() {
        let pair = vec![SignerEntry::new(bob(), 1), SignerEntry::new(carol(), 1)];
        assert!(SignerListSet::new(2, pair.clone()).validate(&common(alice())).is_ok());

        let unreachable = SignerListSet::new(3, pair);
        assert_eq!(unreachable.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Quorum));

        let twice = vec![SignerEntry::new(bob(), 1), SignerEntry::new(bob(), 1)];
        let duplicate = SignerListSet::new(1, twice);
        assert_eq!(duplicate.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Duplicate));

        let owner_listed = SignerListSet::new(1, vec![SignerEntry::new(alice(), 1)]);
        assert_eq!(
            owner_listed.validate(&common(alice())).unwrap_err().rule(),
            Some(Rule::SelfReference)
        );
    }

    #[test]
    fn test_validate_signer_list_delete() {
        assert!(SignerListSet::delete().validate(&common(alice())).is_ok());
        let bad = SignerListSet::new(0, vec![SignerEntry::new(bob(), 1)]);
        assert_eq!(bad.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Quorum));
    }

    #[test]
    fn test_validate_ticket_count() {
        assert!(TicketCreate { ticket_count: 250 }.validate(&common(alice())).is_ok());
        assert!(TicketCreate { ticket_count: 0 }.validate(&common(alice())).is_err());
        assert!(TicketCreate { ticket_count: 251 }.validate(&common(alice())).is_err());
    }

    #[test]
    fn test_validate_account_delete_to_self() {
        let tx = AccountDelete {
            destination: alice(),
            destination_tag: None,
            credential_ids: None,
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::SelfReference));
    }

    #[test]
    fn test_validate_ledger_state_fix() {
        let mut tx = LedgerStateFix {
            ledger_fix_type: LedgerStateFix::NFTOKEN_PAGE_LINK,
            owner: None,
        };
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::RequiredField));
        tx.owner = Some(bob());
        assert!(tx.validate(&common(alice())).is_ok());
        tx.ledger_fix_type = 9;
        assert_eq!(tx.validate(&common(alice())).unwrap_err().rule(), Some(Rule::Range));
    }
}
