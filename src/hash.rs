//! The integrity hash contract: SHA-256 over the bytes that follow the
//! stored digest in a container's header.
//!
//! Kept behind a small trait rather than calling `sha2` directly from
//! [`crate::container`] so the hashing algorithm stays a swappable choke
//! point; the only property the container actually needs is "the same
//! standard SHA-256 digest the file was signed with".

use sha2::{Digest, Sha256};

/// Computes a 32-byte digest over a byte range.
pub trait IntegrityHasher {
    fn digest(bytes: &[u8]) -> [u8; 32];
}

/// Default implementation, backed by the `sha2` crate.
pub struct Sha256Hasher;

impl IntegrityHasher for Sha256Hasher {
    fn digest(bytes: &[u8]) -> [u8; 32] {
        Sha256::digest(bytes).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(Sha256Hasher::digest(b"abc"), expected);
    }

    #[test]
    fn empty_input_is_stable() {
        let first = Sha256Hasher::digest(b"");
        let second = Sha256Hasher::digest(b"");
        assert_eq!(first, second);
    }
}
