//! Consuming builder for [`Transaction`]; `build()` runs every check.

use crate::common::{flags::TF_INNER_BATCH_TXN, Memo, Signer, TransactionCommon};
use crate::error::{Rule, TransactionError};
use crate::kind::TransactionKind;
use crate::transaction::Transaction;
use crate::validation::violation;
use serde_json::Value;
use xrpl_types::{Address, Hash256, NetworkId, PublicKey, Signature, XrpAmount};
use xrpl_utils::ClientConfig;

#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    common: TransactionCommon,
    kind: TransactionKind,
    /// Network the transaction is built for, when known from configuration.
    network: Option<NetworkId>,
}

impl TransactionBuilder {
    pub fn new(account: Address, kind: impl Into<TransactionKind>) -> Self {
        Self::from_parts(TransactionCommon::new(account), kind.into())
    }

    pub(crate) fn from_parts(common: TransactionCommon, kind: TransactionKind) -> Self {
        Self {
            common,
            kind,
            network: None,
        }
    }

    /// Builder preloaded with the configured base fee and, on networks that
    /// require it, the `NetworkID` field.
    pub fn configured(
        config: &ClientConfig,
        account: Address,
        kind: impl Into<TransactionKind>,
    ) -> Result<Self, TransactionError> {
        let mut builder = Self::new(account, kind);
        builder.common.fee = Some(XrpAmount::of_drops(config.base_fee_drops)?);
        if config.network_id.requires_network_id_field() {
            builder.common.network_id = Some(config.network_id);
        }
        builder.network = Some(config.network_id);
        Ok(builder)
    }

    pub fn fee(mut self, fee: XrpAmount) -> Self {
        self.common.fee = Some(fee);
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.common.sequence = Some(sequence);
        self
    }

    /// Consume a ticket instead of a sequence number.
    pub fn ticket_sequence(mut self, ticket: u32) -> Self {
        self.common.sequence = Some(0);
        self.common.ticket_sequence = Some(ticket);
        self
    }

    pub fn account_txn_id(mut self, id: Hash256) -> Self {
        self.common.account_txn_id = Some(id);
        self
    }

    pub fn last_ledger_sequence(mut self, sequence: u32) -> Self {
        self.common.last_ledger_sequence = Some(sequence);
        self
    }

    /// Replace `Flags` entirely.
    pub fn flags(mut self, flags: u32) -> Self {
        self.common.flags = Some(flags);
        self
    }

    /// OR `flag` into the existing `Flags`.
    pub fn set_flag(mut self, flag: u32) -> Self {
        self.common.flags = Some(self.common.flags() | flag);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.common.memos.get_or_insert_with(Vec::new).push(memo);
        self
    }

    pub fn signer(mut self, signer: Signer) -> Self {
        self.common.signers.get_or_insert_with(Vec::new).push(signer);
        self
    }

    pub fn source_tag(mut self, tag: u32) -> Self {
        self.common.source_tag = Some(tag);
        self
    }

    pub fn signing_pub_key(mut self, key: PublicKey) -> Self {
        self.common.signing_pub_key = Some(key);
        self
    }

    pub fn txn_signature(mut self, signature: Signature) -> Self {
        self.common.txn_signature = Some(signature);
        self
    }

    pub fn network_id(mut self, network_id: NetworkId) -> Self {
        self.common.network_id = Some(network_id);
        self
    }

    pub fn delegate(mut self, delegate: Address) -> Self {
        self.common.delegate = Some(delegate);
        self
    }

    /// A field this version has no typed slot for, emitted verbatim.
    pub fn unknown_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.common.unknown_fields.insert(key.into(), value);
        self
    }

    /// Shape the transaction for inclusion in a `Batch`: zero fee, empty
    /// signing key, inner-batch flag.
    pub fn inner_batch(mut self) -> Self {
        self.common.fee = Some(XrpAmount::ZERO);
        self.common.signing_pub_key = Some(PublicKey::MULTI_SIGN);
        self.common.txn_signature = None;
        self.common.signers = None;
        self.set_flag(TF_INNER_BATCH_TXN)
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        if let (Some(network), Some(field)) = (self.network, self.common.network_id) {
            if !network.requires_network_id_field() {
                return Err(violation(
                    Rule::NetworkId,
                    format!("network {network} predates NetworkID, got NetworkID {field}"),
                ));
            }
            if field != network {
                return Err(violation(
                    Rule::NetworkId,
                    format!("NetworkID {field} does not match the configured network {network}"),
                ));
            }
        }
        let transaction = Transaction::from_parts(self.common, self.kind)?;
        tracing::debug!(
            transaction_type = transaction.type_name(),
            account = %transaction.account(),
            "built transaction"
        );
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::TicketCreate;
    use crate::payment::Payment;
    use crate::test_support::*;

    fn payment() -> Payment {
        Payment::new(bob(), xrp(1_000))
    }

    #[test]
    fn test_build_runs_checks() {
        let tx = TransactionBuilder::new(alice(), payment()).sequence(3).build().unwrap();
        assert_eq!(tx.common().sequence, Some(3));

        let err = TransactionBuilder::new(alice(), Payment::new(alice(), xrp(1)))
            .build()
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::SelfReference));
    }

    #[test]
    fn test_build_ticket_sequence() {
        let tx = TransactionBuilder::new(alice(), TicketCreate { ticket_count: 2 })
            .ticket_sequence(40)
            .build()
            .unwrap();
        assert_eq!(tx.common().sequence, Some(0));

        let err = TransactionBuilder::new(alice(), payment())
            .ticket_sequence(40)
            .sequence(9)
            .build()
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::TicketSequence));
    }

    #[test]
    fn test_build_self_delegation() {
        let err = TransactionBuilder::new(alice(), payment())
            .delegate(alice())
            .build()
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::SelfDelegation));
        assert!(TransactionBuilder::new(alice(), payment()).delegate(carol()).build().is_ok());
    }

    #[test]
    fn test_configured_defaults() {
        let config = ClientConfig {
            network_id: NetworkId(21338),
            base_fee_drops: 15,
            ..ClientConfig::default()
        };
        let tx = TransactionBuilder::configured(&config, alice(), payment())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(tx.common().fee().drops(), 15);
        assert_eq!(tx.common().network_id, Some(NetworkId(21338)));

        let mainnet = ClientConfig::default();
        let tx = TransactionBuilder::configured(&mainnet, alice(), payment())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(tx.common().network_id, None);
    }

    #[test]
    fn test_configured_rejects_network_id_on_legacy_network() {
        let err = TransactionBuilder::configured(&ClientConfig::default(), alice(), payment())
            .unwrap()
            .network_id(NetworkId(1))
            .build()
            .unwrap_err();
        assert_eq!(err.rule(), Some(Rule::NetworkId));
    }

    #[test]
    fn test_to_builder_adds_signature() {
        let tx = TransactionBuilder::new(alice(), payment()).build().unwrap();
        let signed = tx
            .to_builder()
            .txn_signature(xrpl_types::HexBlob::from_bytes(&[1; 64]))
            .build()
            .unwrap();
        assert_eq!(signed.kind(), tx.kind());
        assert!(signed.common().txn_signature.is_some());
    }

    #[test]
    fn test_inner_batch_shape() {
        let tx = TransactionBuilder::new(alice(), payment())
            .fee(XrpAmount::of_drops(12).unwrap())
            .inner_batch()
            .build()
            .unwrap();
        assert!(tx.common().fee().is_zero());
        assert!(tx.common().has_flag(TF_INNER_BATCH_TXN));
        assert_eq!(tx.common().signing_pub_key, Some(PublicKey::MULTI_SIGN));
    }
}
