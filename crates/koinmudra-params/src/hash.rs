//! Block-hashing seam and hash literal parsing

use crate::{Error, Result};
use bitcoin::hashes::{sha256d, Hash};
use bitcoin::BlockHash;
use std::fmt;
use std::str::FromStr;

/// The node's block-header hash function.
///
/// Genesis construction only calls this; the proof-of-work algorithm itself
/// belongs to the validation engine.
pub trait BlockHasher {
    /// Hash a consensus-serialized 80-byte block header
    fn hash_header(&self, header: &[u8]) -> BlockHash;
}

/// Double SHA-256 header hashing
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSha256;

impl BlockHasher for DoubleSha256 {
    fn hash_header(&self, header: &[u8]) -> BlockHash {
        BlockHash::from_raw_hash(sha256d::Hash::hash(header))
    }
}

/// Parse a display-order hash literal (`BlockHash`, `TxMerkleNode`, ...)
pub(crate) fn parse_hash<T>(literal: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    T::from_str(literal).map_err(|e| Error::InvalidHash(format!("{literal}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::TxMerkleNode;

    #[test]
    fn test_double_sha_known_vector() {
        // sha256d("a") in display order
        assert_eq!(
            DoubleSha256.hash_header(b"a").to_string(),
            "d8f244c159278ea8cfffcbe1c463edef33d92d11d36ac3c62efd3eb7ff3a5dbf"
        );
    }

    #[test]
    fn test_parse_is_display_order() {
        let literal = "16ef77c00fea8839672de48cd32f7290e3d8f71b76312e7a4d2407fb6387a267";
        let root: TxMerkleNode = parse_hash(literal).unwrap();
        assert_eq!(root.to_byte_array()[0], 0x67);
        assert_eq!(root.to_byte_array()[31], 0x16);
        assert_eq!(root.to_string(), literal);
    }

    #[test]
    fn test_invalid_literals() {
        assert!(matches!(parse_hash::<BlockHash>(""), Err(Error::InvalidHash(_))));
        assert!(parse_hash::<BlockHash>("zz").is_err());
        assert!(parse_hash::<BlockHash>(&"f".repeat(65)).is_err());
    }
}
