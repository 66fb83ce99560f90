//! Blocks and block headers

use crate::encode::{write_compact_size, write_var_bytes, Encodable};
use crate::hash::Hash256;
use crate::merkle::transactions_merkle_root;
use crate::target::CompactTarget;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Encoded header size in bytes
pub const HEADER_SIZE: usize = 80;

/// Block header; the proof-of-work hash covers exactly these fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block format version
    pub version: i32,
    /// Hash of the previous block
    pub prev_block: Hash256,
    /// Merkle root of the block's transactions
    pub merkle_root: Hash256,
    /// Block timestamp (Unix seconds)
    pub time: u32,
    /// Compact difficulty target
    pub bits: CompactTarget,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl BlockHeader {
    /// The 80-byte header encoding
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_consensus().to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(&self.to_bytes())?;
        Ok(HEADER_SIZE)
    }
}

/// A full block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Header
    pub header: BlockHeader,
    /// Transactions, coinbase first
    pub transactions: Vec<Transaction>,
    /// Block signature (proof-of-stake blocks only; empty otherwise)
    pub signature: Vec<u8>,
}

impl Block {
    /// Recompute the Merkle root from the block's transactions
    pub fn compute_merkle_root(&self) -> Hash256 {
        transactions_merkle_root(&self.transactions)
    }

    /// The coinbase transaction, if any
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.first().filter(|tx| tx.is_coinbase())
    }
}

impl Encodable for Block {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut len = self.header.consensus_encode(writer)?;
        len += write_compact_size(writer, self.transactions.len() as u64)?;
        for tx in &self.transactions {
            len += tx.consensus_encode(writer)?;
        }
        len += write_var_bytes(writer, &self.signature)?;
        Ok(len)
    }
}
