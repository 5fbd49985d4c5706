//! Ledger time: seconds since 2000-01-01T00:00:00Z.
//!
//! Expirations, escrow bounds and oracle update times are all expressed in
//! this epoch on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds between the Unix epoch and the ledger epoch.
pub const RIPPLE_EPOCH_OFFSET: u64 = 946_684_800;

/// A timestamp in seconds since the ledger epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RippleTime(u32);

impl RippleTime {
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u32) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Convert a Unix timestamp. Returns `None` if it falls before the
    /// ledger epoch or past the `u32` range.
    pub fn from_unix(unix_secs: u64) -> Option<Self> {
        unix_secs
            .checked_sub(RIPPLE_EPOCH_OFFSET)
            .and_then(|s| u32::try_from(s).ok())
            .map(Self)
    }

    pub fn to_unix(&self) -> u64 {
        u64::from(self.0) + RIPPLE_EPOCH_OFFSET
    }
}

impl fmt::Display for RippleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
