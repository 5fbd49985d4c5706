use std::fmt;
use thiserror::Error;
use xrpl_crypto::CryptoError;
use xrpl_types::TypesError;

/// The cross-field rule a rejected transaction broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    // Envelope
    ReservedField,
    TicketSequence,
    SelfDelegation,
    SignerList,
    MemoShape,
    NetworkId,

    // Shared field rules
    MutuallyExclusive,
    RequiredField,
    ForbiddenField,
    Range,
    FieldLength,
    ListLength,
    Duplicate,
    SelfReference,
    PositiveAmount,
    AmountKind,
    FlagConflict,
    TimeBounds,
    Quorum,

    // Type-specific
    AmmMode,
    NftOfferMode,
    NotDelegable,
    ConditionPair,
    BatchSize,
    BatchMode,
    BatchInnerTransaction,
    BatchDuplicate,
    BatchOuterSigner,
    BatchSignerSet,
    BatchSignerShape,
    PseudoAccount,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Primitive(#[from] TypesError),

    #[error("{rule} rule violated: {detail}")]
    Invariant { rule: Rule, detail: String },

    #[error("malformed transaction JSON: {0}")]
    Decode(String),

    #[error("failed to encode transaction: {0}")]
    Encode(String),

    /// Only the "typed and raw forms disagree" case; undecodable raw data is
    /// a warning, not an error.
    #[error(transparent)]
    Condition(#[from] CryptoError),
}

impl TransactionError {
    /// The violated rule, for invariant failures.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Self::Invariant { rule, .. } => Some(*rule),
            Self::Primitive(_) | Self::Decode(_) | Self::Encode(_) | Self::Condition(_) => None,
        }
    }
}
