//! Compact difficulty targets
//!
//! The block header carries the target as a 32-bit floating-point-like
//! value: one size byte followed by a 23-bit mantissa and a sign bit.

use crate::hash::Hash256;
use crate::{Error, Result};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact encoding of a difficulty target (`nBits`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Wrap a raw compact value
    pub const fn from_consensus(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw compact value as stored in the header
    pub const fn to_consensus(self) -> u32 {
        self.0
    }

    /// Encode a full target in its canonical compact form
    pub fn from_target(target: U256) -> Self {
        let mut size = (target.bits() as u32 + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (target >> (8 * (size - 3)) as usize).low_u64() as u32
        };
        // The mantissa is signed; keep it positive by widening the exponent.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        Self(compact | (size << 24))
    }

    /// Expand to the full 256-bit target
    pub fn to_target(self) -> Result<U256> {
        let size = self.0 >> 24;
        let mut word = self.0 & 0x007f_ffff;

        if word != 0 && self.0 & 0x0080_0000 != 0 {
            return Err(Error::InvalidCompact {
                bits: self.0,
                reason: "negative target",
            });
        }
        if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
            return Err(Error::InvalidCompact {
                bits: self.0,
                reason: "target overflows 256 bits",
            });
        }

        if size <= 3 {
            word >>= 8 * (3 - size);
            Ok(U256::from(word))
        } else {
            Ok(U256::from(word) << (8 * (size - 3)) as usize)
        }
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Check a proof-of-work digest against a target.
///
/// Both sides are compared as little-endian 256-bit integers; a digest equal
/// to the target is accepted.
pub fn hash_meets_target(hash: &Hash256, target: &U256) -> bool {
    hash.to_u256() <= *target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pow_limit() -> U256 {
        !U256::zero() >> 16
    }

    #[test]
    fn test_pow_limit_compact() {
        let bits = CompactTarget::from_target(pow_limit());
        assert_eq!(bits.to_consensus(), 0x1f00_ffff);
    }

    #[test]
    fn test_expand_pow_limit_bits() {
        let target = CompactTarget::from_consensus(0x1f00_ffff).to_target().unwrap();
        assert_eq!(target, U256::from(0xffffu64) << 224);
        assert!(target <= pow_limit());
    }

    #[test]
    fn test_bitcoin_genesis_bits() {
        let target = CompactTarget::from_consensus(0x1d00_ffff).to_target().unwrap();
        assert_eq!(target, U256::from(0xffffu64) << 208);
        assert_eq!(CompactTarget::from_target(target).to_consensus(), 0x1d00_ffff);
    }

    #[test]
    fn test_small_sizes() {
        assert_eq!(
            CompactTarget::from_consensus(0x0112_3456).to_target().unwrap(),
            U256::from(0x12u64)
        );
        assert_eq!(
            CompactTarget::from_consensus(0x0200_8000).to_target().unwrap(),
            U256::from(0x80u64)
        );
        assert_eq!(CompactTarget::from_target(U256::from(0x80u64)).to_consensus(), 0x0200_8000);
        assert_eq!(CompactTarget::from_target(U256::zero()).to_consensus(), 0);
    }

    #[test]
    fn test_rejects_negative() {
        let err = CompactTarget::from_consensus(0x0480_0001).to_target().unwrap_err();
        assert!(matches!(err, Error::InvalidCompact { .. }));
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(CompactTarget::from_consensus(0xff12_3456).to_target().is_err());
        assert!(CompactTarget::from_consensus(0x2301_0000).to_target().is_err());
    }

    #[test]
    fn test_hash_meets_target_boundary() {
        let target = U256::from(0x1000u64);
        assert!(hash_meets_target(&Hash256::from_u256(U256::from(0x1000u64)), &target));
        assert!(hash_meets_target(&Hash256::from_u256(U256::from(0x0fffu64)), &target));
        assert!(!hash_meets_target(&Hash256::from_u256(U256::from(0x1001u64)), &target));
    }

    #[test]
    fn test_hash_meets_target_uses_high_bytes() {
        // A digest whose first stored byte is large but whose top bytes are
        // zero is still small as a number.
        let mut bytes = [0u8; 32];
        bytes[0] = 0xff;
        let target = U256::from(0x1_0000u64);
        assert!(hash_meets_target(&Hash256::from_bytes(bytes), &target));

        let mut bytes = [0u8; 32];
        bytes[31] = 0x01;
        assert!(!hash_meets_target(&Hash256::from_bytes(bytes), &target));
    }
}
