//! The envelope every transaction shares.

use serde::{Deserialize, Serialize};
use xrpl_types::{
    Address, Hash256, HexBlob, NetworkId, PublicKey, Signature, UnknownFields, XrpAmount,
};

/// Flags valid on every transaction type.
pub mod flags {
    /// Historical; always set by modern signers and ignored by the network.
    pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;
    /// Marks a transaction as an inner transaction of a `Batch`.
    pub const TF_INNER_BATCH_TXN: u32 = 0x4000_0000;

    pub const UNIVERSAL: u32 = TF_FULLY_CANONICAL_SIG | TF_INNER_BATCH_TXN;
}

/// Envelope keys. None of these may be smuggled in through the pass-through
/// map, and the discriminator is held outside the envelope altogether.
pub const ENVELOPE_FIELDS: &[&str] = &[
    "TransactionType",
    "Account",
    "Fee",
    "Sequence",
    "TicketSequence",
    "AccountTxnID",
    "LastLedgerSequence",
    "Flags",
    "Memos",
    "Signers",
    "SourceTag",
    "SigningPubKey",
    "TxnSignature",
    "NetworkID",
    "Delegate",
];

/// Fields shared by every transaction type.
///
/// Optional wire fields stay `Option` so that decoding then re-encoding
/// reproduces exactly the fields that were present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionCommon {
    #[serde(rename = "Account")]
    pub account: Address,

    #[serde(rename = "Fee", default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<XrpAmount>,

    #[serde(rename = "Sequence", default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(rename = "TicketSequence", default, skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,

    #[serde(rename = "AccountTxnID", default, skip_serializing_if = "Option::is_none")]
    pub account_txn_id: Option<Hash256>,

    #[serde(rename = "LastLedgerSequence", default, skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,

    #[serde(rename = "Flags", default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,

    #[serde(rename = "Memos", default, skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<Memo>>,

    #[serde(rename = "Signers", default, skip_serializing_if = "Option::is_none")]
    pub signers: Option<Vec<Signer>>,

    #[serde(rename = "SourceTag", default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,

    /// Empty ([`PublicKey::MULTI_SIGN`]) when multi-signed or a batch inner
    /// transaction.
    #[serde(rename = "SigningPubKey", default, skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<PublicKey>,

    #[serde(rename = "TxnSignature", default, skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<Signature>,

    #[serde(rename = "NetworkID", default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,

    #[serde(rename = "Delegate", default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Address>,

    /// Everything this version does not recognise, in arrival order.
    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

impl TransactionCommon {
    pub fn new(account: Address) -> Self {
        Self {
            account,
            fee: None,
            sequence: None,
            ticket_sequence: None,
            account_txn_id: None,
            last_ledger_sequence: None,
            flags: None,
            memos: None,
            signers: None,
            source_tag: None,
            signing_pub_key: None,
            txn_signature: None,
            network_id: None,
            delegate: None,
            unknown_fields: UnknownFields::new(),
        }
    }

    /// `Flags`, with an absent field reading as zero.
    pub fn flags(&self) -> u32 {
        self.flags.unwrap_or(0)
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags() & flag == flag
    }

    /// `Fee`, with an absent field reading as zero.
    pub fn fee(&self) -> XrpAmount {
        self.fee.unwrap_or(XrpAmount::ZERO)
    }

    pub fn signers(&self) -> &[Signer] {
        self.signers.as_deref().unwrap_or_default()
    }

    pub fn memos(&self) -> &[Memo] {
        self.memos.as_deref().unwrap_or_default()
    }

    pub fn is_multi_signed(&self) -> bool {
        self.signing_pub_key.as_ref().map_or(true, PublicKey::is_multi_sign)
            && !self.signers().is_empty()
    }
}

/// `{"Memo": {"MemoData": .., "MemoFormat": .., "MemoType": ..}}`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Memo {
    #[serde(rename = "Memo")]
    pub memo: MemoFields,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<HexBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<HexBlob>,
}

impl Memo {
    /// A memo whose data, format and type are UTF-8 text.
    pub fn text(data: &str, format: Option<&str>, memo_type: Option<&str>) -> Self {
        Self {
            memo: MemoFields {
                memo_data: Some(HexBlob::from_utf8(data)),
                memo_format: format.map(HexBlob::from_utf8),
                memo_type: memo_type.map(HexBlob::from_utf8),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.memo.memo_data.is_none()
            && self.memo.memo_format.is_none()
            && self.memo.memo_type.is_none()
    }
}

/// `{"Signer": {"Account": .., "TxnSignature": .., "SigningPubKey": ..}}`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    #[serde(rename = "Signer")]
    pub signer: SignerFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerFields {
    pub account: Address,
    pub txn_signature: Signature,
    pub signing_pub_key: PublicKey,
}

impl Signer {
    pub fn new(account: Address, txn_signature: Signature, signing_pub_key: PublicKey) -> Self {
        Self {
            signer: SignerFields {
                account,
                txn_signature,
                signing_pub_key,
            },
        }
    }

    pub fn account(&self) -> &Address {
        &self.signer.account
    }
}
