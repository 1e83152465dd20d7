// Copyright 2025 Bilinear Labs - MIT License

//! The JSON wire format for [`Proof`] and [`UpdateProof`]: hex-encoded
//! fields for cross-platform interoperability, lenient on the way in
//! (indices may be decimal or hex, unknown fields are ignored) and
//! canonical on the way out (always `0x`-prefixed hex).

use crate::error::MerkleError;
use crate::hash::H256;
use crate::proof::{Proof, UpdateProof};
use crate::types::{Enables, Index};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct ProofJson {
    exists: bool,
    leaf: String,
    value: String,
    index: String,
    enables: String,
    siblings: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct UpdateProofJson {
    old: ProofJson,
    #[serde(rename = "newLeaf")]
    new_leaf: String,
}

/// Decodes a hex string (optionally `0x`-prefixed, odd-length tolerant) into
/// a big-endian 32-byte integer.
fn decode_hex_u256(hex: &str) -> Result<Index, MerkleError> {
    let padded = if hex.len() % 2 == 1 { format!("0{hex}") } else { hex.to_string() };
    if padded.len() > 64 {
        return Err(MerkleError::HexDecode(format!("hex value too long: {} characters", padded.len())));
    }
    let padded = format!("{:0>64}", padded);
    let bytes = hex::decode(padded).map_err(|e| MerkleError::HexDecode(e.to_string()))?;
    Ok(Index::from_big_endian(&bytes))
}

/// Parses an index field that may be a decimal literal or a `0x`-prefixed
/// (or bare) hex literal, matching common conventions across client
/// languages.
fn parse_index(s: &str) -> Result<Index, MerkleError> {
    let trimmed = s.trim();
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return decode_hex_u256(hex);
    }
    Index::from_dec_str(trimmed).map_err(|e| MerkleError::HexDecode(e.to_string()))
}

fn parse_enables(s: &str) -> Result<Enables, MerkleError> {
    let trimmed = s.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| MerkleError::HexDecode("enables field must be 0x-prefixed hex".to_string()))?;
    decode_hex_u256(hex)
}

impl TryFrom<&Proof> for ProofJson {
    type Error = MerkleError;

    fn try_from(p: &Proof) -> Result<Self, Self::Error> {
        Ok(ProofJson {
            exists: p.exists,
            leaf: p.leaf.to_string(),
            value: p.value.to_string(),
            index: format!("0x{:x}", p.index),
            enables: format!("0x{:x}", p.enables),
            siblings: p.siblings.iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl TryFrom<ProofJson> for Proof {
    type Error = MerkleError;

    fn try_from(j: ProofJson) -> Result<Self, Self::Error> {
        Ok(Proof {
            exists: j.exists,
            leaf: H256::from_hex(&j.leaf)?,
            value: H256::from_hex(&j.value)?,
            index: parse_index(&j.index)?,
            enables: parse_enables(&j.enables)?,
            siblings: j.siblings.iter().map(|s| H256::from_hex(s)).collect::<Result<_, _>>()?,
        })
    }
}

impl Proof {
    pub fn to_json_string(&self) -> Result<String, MerkleError> {
        let j = ProofJson::try_from(self)?;
        serde_json::to_string(&j).map_err(|e| MerkleError::HexDecode(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, MerkleError> {
        let j: ProofJson = serde_json::from_str(s).map_err(|e| MerkleError::HexDecode(e.to_string()))?;
        Proof::try_from(j)
    }
}

impl UpdateProof {
    pub fn to_json_string(&self) -> Result<String, MerkleError> {
        let j = UpdateProofJson { old: ProofJson::try_from(&self.old)?, new_leaf: self.new_leaf.to_string() };
        serde_json::to_string(&j).map_err(|e| MerkleError::HexDecode(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self, MerkleError> {
        let j: UpdateProofJson = serde_json::from_str(s).map_err(|e| MerkleError::HexDecode(e.to_string()))?;
        Ok(UpdateProof { old: Proof::try_from(j.old)?, new_leaf: H256::from_hex(&j.new_leaf)? })
    }
}
