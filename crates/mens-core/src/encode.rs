//! Consensus serialization
//!
//! Integers are little-endian; collection and byte-string lengths use the
//! compact-size prefix.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Types with a consensus byte encoding
pub trait Encodable {
    /// Write the consensus encoding, returning the number of bytes written
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> io::Result<usize>;

    /// Consensus encoding as a fresh buffer
    fn to_consensus_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.consensus_encode(&mut buf);
        buf
    }
}

/// Write a compact-size length prefix
pub fn write_compact_size<W: Write>(writer: &mut W, n: u64) -> io::Result<usize> {
    if n < 0xfd {
        writer.write_u8(n as u8)?;
        Ok(1)
    } else if n <= 0xffff {
        writer.write_u8(0xfd)?;
        writer.write_u16::<LittleEndian>(n as u16)?;
        Ok(3)
    } else if n <= 0xffff_ffff {
        writer.write_u8(0xfe)?;
        writer.write_u32::<LittleEndian>(n as u32)?;
        Ok(5)
    } else {
        writer.write_u8(0xff)?;
        writer.write_u64::<LittleEndian>(n)?;
        Ok(9)
    }
}

/// Write a length-prefixed byte string
pub fn write_var_bytes<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<usize> {
    let n = write_compact_size(writer, data.len() as u64)?;
    writer.write_all(data)?;
    Ok(n + data.len())
}
