//! Merkle root over transaction ids

use crate::hash::{double_sha256, Hash256};
use crate::transaction::Transaction;

/// Fold a level of leaf hashes into the root.
///
/// Nodes are paired left to right; on odd levels the last node is paired
/// with itself. A single leaf is its own root and an empty list yields zero.
pub fn build_merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }

    let mut level: Vec<Hash256> = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(left.as_bytes());
                buf[32..].copy_from_slice(right.as_bytes());
                double_sha256(&buf)
            })
            .collect();
    }
    level[0]
}

/// Merkle root of a block's transactions
pub fn transactions_merkle_root(txs: &[Transaction]) -> Hash256 {
    let ids: Vec<Hash256> = txs.iter().map(Transaction::txid).collect();
    build_merkle_root(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert_eq!(build_merkle_root(&[]), Hash256::ZERO);
        let leaf = Hash256::from_bytes([7u8; 32]);
        assert_eq!(build_merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn test_pair() {
        let root = build_merkle_root(&[
            Hash256::from_bytes([1u8; 32]),
            Hash256::from_bytes([2u8; 32]),
        ]);
        assert_eq!(
            hex::encode(root.as_bytes()),
            "39ce20bede82c96b8908bec4a157b09c549b3db90b9b474bda9ae9b9030310b4"
        );
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let root = build_merkle_root(&[
            Hash256::from_bytes([1u8; 32]),
            Hash256::from_bytes([2u8; 32]),
            Hash256::from_bytes([3u8; 32]),
        ]);
        assert_eq!(
            hex::encode(root.as_bytes()),
            "223e023fadf1f053df26988871f893c821c28edf77d64a955e6c2a02d547bdac"
        );
    }
}
