// Copyright 2025 Bilinear Labs - MIT License

//! The 32-byte hash/value type and the two hash constructions the tree is
//! built on: the inner node hash (Rule H, with the Rule Z zero-absorption
//! special case) and the domain-separated leaf hash (Rule L).

use crate::error::MerkleError;
use crate::types::Index;
use rand::RngCore;
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

/// An opaque 32-byte hash or value.
///
/// `H256::ZERO` has a special role: it is the canonical representation of
/// an empty subtree, and is never written to a [`Store`](crate::stores::store::Store).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256([u8; H256::LEN]);

impl H256 {
    pub const LEN: usize = 32;
    pub const ZERO: H256 = H256([0; H256::LEN]);

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut out = [0u8; Self::LEN];
        out.copy_from_slice(bytes);
        H256(out)
    }

    pub fn random() -> Self {
        let mut bytes = [0u8; Self::LEN];
        rand::rng().fill_bytes(&mut bytes);
        bytes.into()
    }

    /// Parses a hexadecimal string into an `H256`. Case-insensitive, the
    /// `0x` prefix is optional, and the digits are left-padded to 64 hex
    /// characters (32 bytes) if shorter.
    pub fn from_hex(s: &str) -> Result<Self, MerkleError> {
        let s = s.trim();
        let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

        if stripped.is_empty() || stripped.len() > Self::LEN * 2 {
            return Err(MerkleError::HexDecode(format!(
                "hex string must be between 1 and {} characters, got {}",
                Self::LEN * 2,
                stripped.len()
            )));
        }

        let padded = format!("{:0>width$}", stripped, width = Self::LEN * 2);
        let bytes = hex::decode(padded).map_err(|e| MerkleError::HexDecode(e.to_string()))?;

        Ok(H256::from_slice(&bytes))
    }
}

impl From<[u8; H256::LEN]> for H256 {
    fn from(bytes: [u8; H256::LEN]) -> Self {
        H256(bytes)
    }
}

impl TryFrom<&str> for H256 {
    type Error = MerkleError;

    fn try_from(hex: &str) -> Result<Self, Self::Error> {
        H256::from_hex(hex)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({self})")
    }
}

/// Parses a 32-byte hex literal at the call site, panicking on malformed
/// input. Intended for tests and constant table initialization.
#[macro_export]
macro_rules! h256 {
    ($hex:expr) => {{
        $crate::hash::H256::from_hex($hex).expect("invalid H256 hex literal")
    }};
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Rule H / Rule Z: `Keccak256(left || right)`, except that
/// `node_hash(zero, zero) == zero` exactly, the zero-absorption rule that
/// makes empty subtrees free to represent and free to prove.
pub fn node_hash(left: &H256, right: &H256) -> H256 {
    if left.is_zero() && right.is_zero() {
        return H256::ZERO;
    }

    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_ref());
    buf[32..].copy_from_slice(right.as_ref());
    H256(keccak256(&buf))
}

/// Rule L: `Keccak256(index_be32 || value || 0x01)`. The trailing `0x01`
/// domain tag distinguishes leaf preimages (65 bytes) from inner-node
/// preimages (64 bytes, untagged); it is applied unconditionally, even when
/// `value` is `H256::ZERO` (a tombstone still hashes to a nonzero leaf).
pub fn leaf_hash(index: Index, value: &H256) -> H256 {
    let mut buf = [0u8; 65];
    index.to_big_endian(&mut buf[..32]);
    buf[32..64].copy_from_slice(value.as_ref());
    buf[64] = 0x01;
    H256(keccak256(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_hash_zero_absorption() {
        assert_eq!(node_hash(&H256::ZERO, &H256::ZERO), H256::ZERO);
    }

    #[test]
    fn test_node_hash_nonzero() {
        let a = h256!("0x0100000000000000000000000000000000000000000000000000000000000000");
        // hashing a real value with zero must not collapse to zero.
        assert_ne!(node_hash(&a, &H256::ZERO), H256::ZERO);
        assert_ne!(node_hash(&H256::ZERO, &a), H256::ZERO);
    }

    #[test]
    fn test_leaf_hash_nonzero_even_for_zero_value() {
        let l = leaf_hash(Index::from(5u64), &H256::ZERO);
        assert_ne!(l, H256::ZERO);
    }

    #[test]
    fn test_hex_left_pads() {
        assert_eq!(h256!("0x1"), h256!("0x0000000000000000000000000000000000000000000000000000000000000001"));
        assert_eq!(h256!("1"), h256!("0x1"));
        assert_eq!(h256!("0X1"), h256!("0x1"));
    }

    #[test]
    fn test_hex_roundtrip_display() {
        let v = h256!("0x760bde345debf3075c7fc0bcd2134e16ce5fc1a13adaa66ec6452a391f70595c");
        assert_eq!(
            format!("{v}"),
            "0x760bde345debf3075c7fc0bcd2134e16ce5fc1a13adaa66ec6452a391f70595c"
        );
    }

    #[test]
    fn test_hex_rejects_overlong() {
        assert!(H256::from_hex(&"ab".repeat(33)).is_err());
    }
}
