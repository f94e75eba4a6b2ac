//! Variable-length integer encoding for index files.
//!
//! Seven payload bits per byte, least significant group first, with the
//! high bit set on every byte except the last.

use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{Result, WordNetError};

/// Longest encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Append the encoding of `value` to `out`, returning the number of bytes written.
pub fn encode_u64(value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    let mut val = value;

    while val >= 0x80 {
        out.push((val as u8 & 0x7F) | 0x80);
        val >>= 7;
    }
    out.push(val as u8);

    out.len() - start
}

/// Read one varint from `reader`, returning the value and its raw bytes.
pub fn read_u64<R: Read>(reader: &mut R) -> Result<(u64, Vec<u8>)> {
    let mut result = 0u64;
    let mut raw = Vec::with_capacity(2);

    loop {
        let byte = reader.read_u8()?;
        raw.push(byte);

        if raw.len() > MAX_VARINT_LEN {
            return Err(WordNetError::index("varint overflow"));
        }

        result |= ((byte & 0x7F) as u64) << (7 * (raw.len() - 1));

        if byte & 0x80 == 0 {
            return Ok((result, raw));
        }
    }
}
