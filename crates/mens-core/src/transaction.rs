//! Transactions
//!
//! Proof-of-stake layout: the transaction carries its own timestamp right
//! after the version field.

use crate::amount::Amount;
use crate::encode::{write_compact_size, write_var_bytes, Encodable};
use crate::hash::{double_sha256, Hash256};
use crate::script::Script;
use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Transaction id being spent
    pub txid: Hash256,
    /// Output index
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint referenced by coinbase inputs
    pub const fn null() -> Self {
        Self {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }

    /// Check if this is the null outpoint
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    /// Output being spent
    pub prevout: OutPoint,
    /// Unlocking script
    pub script_sig: Script,
    /// Sequence number
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Value in base units
    pub value: Amount,
    /// Locking script
    pub script_pubkey: Script,
}

impl TxOut {
    /// An output with no value and no script; it can never be spent
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    /// Check if the output carries neither value nor script
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// A transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction format version
    pub version: i32,
    /// Transaction timestamp (Unix seconds)
    pub time: u32,
    /// Inputs
    pub inputs: Vec<TxIn>,
    /// Outputs
    pub outputs: Vec<TxOut>,
    /// Lock time
    pub lock_time: u32,
}

impl Transaction {
    /// Transaction id: double SHA-256 of the consensus encoding
    pub fn txid(&self) -> Hash256 {
        double_sha256(&self.to_consensus_bytes())
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }
}

impl Encodable for OutPoint {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(self.txid.as_bytes())?;
        writer.write_u32::<LittleEndian>(self.vout)?;
        Ok(36)
    }
}

impl Encodable for TxIn {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let mut len = self.prevout.consensus_encode(writer)?;
        len += write_var_bytes(writer, self.script_sig.as_bytes())?;
        writer.write_u32::<LittleEndian>(self.sequence)?;
        Ok(len + 4)
    }
}

impl Encodable for TxOut {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_i64::<LittleEndian>(self.value)?;
        let len = write_var_bytes(writer, self.script_pubkey.as_bytes())?;
        Ok(8 + len)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_i32::<LittleEndian>(self.version)?;
        writer.write_u32::<LittleEndian>(self.time)?;
        let mut len = 8;

        len += write_compact_size(writer, self.inputs.len() as u64)?;
        for input in &self.inputs {
            len += input.consensus_encode(writer)?;
        }

        len += write_compact_size(writer, self.outputs.len() as u64)?;
        for output in &self.outputs {
            len += output.consensus_encode(writer)?;
        }

        writer.write_u32::<LittleEndian>(self.lock_time)?;
        Ok(len + 4)
    }
}
