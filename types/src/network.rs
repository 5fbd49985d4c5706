//! Network identifier carried in the `NetworkID` envelope field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which chain a transaction is meant for.
///
/// Legacy networks (id <= 1024) predate the field and must omit it; every
/// newer network requires it so signatures cannot be replayed across chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(pub u32);

impl NetworkId {
    pub const MAINNET: Self = Self(0);
    pub const TESTNET: Self = Self(1);
    pub const DEVNET: Self = Self(2);

    /// Highest id that must not carry an explicit `NetworkID` field.
    pub const LEGACY_MAX: u32 = 1024;

    pub fn requires_network_id_field(&self) -> bool {
        self.0 > Self::LEGACY_MAX
    }

    /// Human-readable name for the well-known networks.
    pub fn as_str(&self) -> &'static str {
        match self.0 {
            0 => "mainnet",
            1 => "testnet",
            2 => "devnet",
            _ => "sidechain",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_networks_omit_the_field() {
        assert!(!NetworkId::MAINNET.requires_network_id_field());
        assert!(!NetworkId(1024).requires_network_id_field());
        assert!(NetworkId(1025).requires_network_id_field());
    }
}
