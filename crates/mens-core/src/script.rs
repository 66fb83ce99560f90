//! Script construction
//!
//! Only the push operations needed to assemble coinbase unlocking scripts.

use serde::{Deserialize, Serialize};

/// Push an empty byte vector (also the number zero)
pub const OP_0: u8 = 0x00;
/// Next byte holds the push length
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes hold the push length
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes hold the push length
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number -1
pub const OP_1NEGATE: u8 = 0x4f;
/// Push the number 1 (OP_2..OP_16 follow)
pub const OP_1: u8 = 0x51;

/// A serialized script
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create an empty script
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Push a small integer using the dedicated opcodes where one exists
    pub fn push_int(mut self, n: i64) -> Self {
        match n {
            0 => self.0.push(OP_0),
            -1 => self.0.push(OP_1NEGATE),
            1..=16 => self.0.push(OP_1 + (n as u8) - 1),
            _ => return self.push_num(n),
        }
        self
    }

    /// Push a number as minimally encoded data, never as an opcode
    pub fn push_num(self, n: i64) -> Self {
        let bytes = encode_script_num(n);
        self.push_slice(&bytes)
    }

    /// Push raw data with the shortest length prefix
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Script bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Script length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Minimal little-endian sign-magnitude encoding of a script number
pub fn encode_script_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // The top bit carries the sign, so add a byte if it is already taken.
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}
