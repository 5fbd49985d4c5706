use proptest::prelude::*;
use std::collections::HashSet;

use xrpl_transactions::batch::flags::{
    TF_ALL_OR_NOTHING, TF_INDEPENDENT, TF_ONLY_ONE, TF_UNTIL_FAILURE,
};
use xrpl_transactions::payment::Payment;
use xrpl_transactions::{
    Batch, BatchSigner, Rule, Transaction, TransactionBuilder, TransactionError,
};
use xrpl_types::{Address, HexBlob, PublicKey, XrpAmount};

const ACCOUNTS: [&str; 4] = [
    "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
    "rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW",
    "r9cZA1mLK5R5Am25ArfXFmqgNwjZgnfk59",
    "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn",
];
const MODES: [u32; 4] = [TF_ALL_OR_NOTHING, TF_ONLY_ONE, TF_UNTIL_FAILURE, TF_INDEPENDENT];

fn account(index: usize) -> Address {
    Address::new(ACCOUNTS[index]).unwrap()
}

/// The submitter of every generated batch.
fn outer() -> Address {
    account(0)
}

/// Inner payment `n` from `sender`; distinct `n` keeps inner transactions unique.
fn inner(sender: usize, n: u64) -> Transaction {
    let destination = account((sender + 1) % ACCOUNTS.len());
    let amount = XrpAmount::of_drops(n + 1).unwrap().into();
    TransactionBuilder::new(account(sender), Payment::new(destination, amount))
        .sequence(1)
        .inner_batch()
        .build()
        .unwrap()
}

fn signer(index: usize) -> BatchSigner {
    BatchSigner::single(
        account(index),
        PublicKey::new(format!("ED{}", "5A".repeat(32))).unwrap(),
        HexBlob::from_bytes(&[index as u8; 64]),
    )
}

fn build(batch: Batch, flags: u32) -> Result<Transaction, TransactionError> {
    TransactionBuilder::new(outer(), batch)
        .fee(XrpAmount::of_drops(100).unwrap())
        .flags(flags)
        .build()
}

proptest! {
    /// A batch is accepted exactly when it holds 2..=8 inner transactions.
    #[test]
    fn batch_size_bounds(count in 0usize..=12, mode in 0usize..4) {
        let batch = Batch::new((0..count as u64).map(|n| inner(0, n)));
        let result = build(batch, MODES[mode]);
        if (2..=8).contains(&count) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().rule(), Some(Rule::BatchSize));
        }
    }

    /// Exactly one of the four mode flags must be set.
    #[test]
    fn exactly_one_mode(mask in 0u32..16) {
        let flags = MODES
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .fold(0, |acc, (_, flag)| acc | flag);
        let result = build(Batch::new([inner(0, 1), inner(0, 2)]), flags);
        if mask.count_ones() == 1 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().rule(), Some(Rule::BatchMode));
        }
    }

    /// With a non-empty signer list, the signers must be exactly the
    /// participants other than the submitter, and never the submitter.
    #[test]
    fn signer_set_matches_participants(
        senders in prop::collection::vec(0usize..4, 2..=8),
        signer_mask in 1u32..16,
    ) {
        let batch = Batch::new(
            senders.iter().enumerate().map(|(n, sender)| inner(*sender, n as u64)),
        );
        let signing: Vec<usize> = (0..4).filter(|i| signer_mask & (1 << i) != 0).collect();
        let batch = batch.with_signers(signing.iter().map(|i| signer(*i)).collect());

        let required: HashSet<usize> = senders.iter().copied().filter(|s| *s != 0).collect();
        let signed: HashSet<usize> = signing.iter().copied().collect();
        let result = build(batch, TF_ALL_OR_NOTHING);

        if signed.contains(&0) {
            prop_assert_eq!(result.unwrap_err().rule(), Some(Rule::BatchOuterSigner));
        } else if signed == required {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().rule(), Some(Rule::BatchSignerSet));
        }
    }

    /// Decoding the encoded form of a valid batch gives back the same value.
    #[test]
    fn valid_batches_round_trip(count in 2usize..=8, mode in 0usize..4) {
        let batch = Batch::new((0..count as u64).map(|n| inner(n as usize % 2, n)))
            .with_signers(vec![signer(1)]);
        let tx = build(batch, MODES[mode]).unwrap();
        let decoded = Transaction::from_json(tx.to_json().unwrap()).unwrap();
        prop_assert_eq!(decoded, tx);
    }
}
