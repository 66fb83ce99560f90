//! Proof-of-work header hashing
//!
//! [`HeaderHasher`] is the seam through which block identity is computed.
//! [`ScryptPow`] is the chain's own function; [`DoubleSha256Pow`] is a cheap
//! stand-in for tooling and tests that exercise nonce search.

use crate::block::BlockHeader;
use crate::hash::{double_sha256, Hash256};
use crate::{Error, Result};

/// Computes the proof-of-work digest of a block header
pub trait HeaderHasher {
    /// Hash the 80-byte header encoding
    fn hash_header(&self, header: &BlockHeader) -> Result<Hash256>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// scrypt(N=1024, r=1, p=1) over the header, salted with itself.
///
/// The 32-byte output is read as a little-endian integer and shifted down by
/// one byte. Every block hash recorded for this chain, genesis included,
/// follows this definition.
#[derive(Clone)]
pub struct ScryptPow {
    params: scrypt::Params,
}

impl ScryptPow {
    /// log2(N)
    pub const LOG_N: u8 = 10;
    /// Block size parameter
    pub const R: u32 = 1;
    /// Parallelism parameter
    pub const P: u32 = 1;

    /// Create the hasher with the chain's scrypt parameters
    pub fn new() -> Result<Self> {
        let params = scrypt::Params::new(Self::LOG_N, Self::R, Self::P, 32)
            .map_err(|e| Error::Scrypt(e.to_string()))?;
        Ok(Self { params })
    }

    /// Raw scrypt output for a header, before the byte shift
    pub fn raw_digest(&self, header: &BlockHeader) -> Result<[u8; 32]> {
        let bytes = header.to_bytes();
        let mut out = [0u8; 32];
        scrypt::scrypt(&bytes, &bytes, &self.params, &mut out)
            .map_err(|e| Error::Scrypt(e.to_string()))?;
        Ok(out)
    }
}

impl HeaderHasher for ScryptPow {
    fn hash_header(&self, header: &BlockHeader) -> Result<Hash256> {
        let raw = self.raw_digest(header)?;
        let mut shifted = [0u8; 32];
        shifted[..31].copy_from_slice(&raw[1..]);
        Ok(Hash256::from_bytes(shifted))
    }

    fn name(&self) -> &'static str {
        "scrypt"
    }
}

/// Double SHA-256 over the header
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSha256Pow;

impl HeaderHasher for DoubleSha256Pow {
    fn hash_header(&self, header: &BlockHeader) -> Result<Hash256> {
        Ok(double_sha256(&header.to_bytes()))
    }

    fn name(&self) -> &'static str {
        "sha256d"
    }
}
