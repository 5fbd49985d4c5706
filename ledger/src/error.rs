use thiserror::Error;
use xrpl_types::TypesError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger entry must be a JSON object")]
    NotAnObject,

    #[error("ledger entry has no LedgerEntryType discriminator")]
    MissingEntryType,

    #[error("failed to decode {entry_type} entry: {source}")]
    Decode {
        entry_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode ledger entry: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Primitive(#[from] TypesError),
}
