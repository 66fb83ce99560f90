//! 256-bit digests
//!
//! Digests are stored in internal byte order (little-endian, as produced by
//! the hash function) and displayed reversed, the way block explorers show
//! block and transaction ids.

use crate::{Error, Result};
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 32-byte digest in internal byte order
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// The all-zero digest (previous block of a genesis block)
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Wrap raw bytes given in internal byte order
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes in internal byte order
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse the reversed-hex display form
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes: [u8; 32] = hex::decode(s)
            .map_err(|e| Error::Hex(format!("{}: {}", s, e)))?
            .try_into()
            .map_err(|v: Vec<u8>| Error::Hex(format!("expected 32 bytes, got {}", v.len())))?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// Reversed-hex display form
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// Interpret the digest as a little-endian 256-bit integer
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    /// Build a digest from a 256-bit integer
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_little_endian(&mut bytes);
        Self(bytes)
    }

    /// Check whether every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash256 {
    let digest = Sha256::digest(Sha256::digest(data));
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Hash256(bytes)
}
