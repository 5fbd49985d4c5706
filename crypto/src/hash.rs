//! SHA-256 hashing for condition fingerprints.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty() {
        let digest = sha256(b"");
        assert_eq!(digest[..4], [0xE3, 0xB0, 0xC4, 0x42]);
    }

    #[test]
    fn sha256_deterministic() {
        assert_eq!(sha256(b"escrow"), sha256(b"escrow"));
        assert_ne!(sha256(b"escrow"), sha256(b"Escrow"));
    }
}
