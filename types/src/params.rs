//! Protocol limits mirrored from the consensus layer's preflight checks.
//!
//! These are fixed by the protocol (changing them requires an amendment),
//! so they are constants rather than configuration.

// ── Account settings ────────────────────────────────────────────────────
/// `TransferRate` of zero clears the rate; otherwise it must fall in this
/// range (1.0x .. 2.0x, in billionths).
pub const MIN_TRANSFER_RATE: u32 = 1_000_000_000;
pub const MAX_TRANSFER_RATE: u32 = 2_000_000_000;
pub const MIN_TICK_SIZE: u8 = 3;
pub const MAX_TICK_SIZE: u8 = 15;

// ── Multi-signing and tickets ───────────────────────────────────────────
pub const MAX_SIGNER_ENTRIES: usize = 32;
pub const MAX_TICKETS_PER_TRANSACTION: u32 = 250;

// ── Batch ───────────────────────────────────────────────────────────────
pub const MIN_BATCH_TRANSACTIONS: usize = 2;
pub const MAX_BATCH_TRANSACTIONS: usize = 8;

// ── Delegation and credentials ──────────────────────────────────────────
pub const MAX_DELEGATE_PERMISSIONS: usize = 10;
pub const MAX_CREDENTIAL_TYPE_BYTES: usize = 64;
pub const MAX_PREAUTH_CREDENTIALS: usize = 8;
pub const MAX_DOMAIN_CREDENTIALS: usize = 10;

// ── Tokens ──────────────────────────────────────────────────────────────
/// Transfer fee in hundredths of a basis point (50000 = 50%).
pub const MAX_TRANSFER_FEE: u16 = 50_000;
pub const MAX_URI_BYTES: usize = 256;
pub const MAX_MPT_METADATA_BYTES: usize = 1024;

// ── AMM ─────────────────────────────────────────────────────────────────
/// Trading fee in units of 1/100000 (1000 = 1%).
pub const MAX_AMM_TRADING_FEE: u16 = 1000;
pub const MAX_AMM_AUTH_ACCOUNTS: usize = 4;

// ── DID and oracles ─────────────────────────────────────────────────────
pub const MAX_DID_FIELD_BYTES: usize = 256;
pub const MAX_ORACLE_PRICE_DATA: usize = 10;
pub const MAX_ORACLE_PROVIDER_BYTES: usize = 256;
pub const MAX_ORACLE_URI_BYTES: usize = 256;
pub const MAX_ORACLE_ASSET_CLASS_BYTES: usize = 16;
pub const MAX_ORACLE_SCALE: u8 = 10;
