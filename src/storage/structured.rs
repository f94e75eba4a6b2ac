//! Structured binary I/O for persisted index files.
//!
//! Values are little-endian; counts and ids are varints; strings are
//! length-prefixed UTF-8. [`StructWriter::close`] appends a CRC32 of every
//! byte written, which [`StructReader::verify_checksum`] checks.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher;

use crate::error::{Result, WordNetError};
use crate::storage::{StorageInput, StorageOutput};
use crate::util::varint;

/// A structured file writer for binary data.
pub struct StructWriter<W: StorageOutput> {
    writer: W,
    hasher: Hasher,
    position: u64,
}

impl<W: StorageOutput> StructWriter<W> {
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            hasher: Hasher::new(),
            position: 0,
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.hasher.update(bytes);
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_raw(&value.to_le_bytes())
    }

    /// Write a u64 value (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_raw(&value.to_le_bytes())
    }

    /// Write a variable-length integer.
    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        let mut encoded = Vec::with_capacity(varint::MAX_VARINT_LEN);
        varint::encode_u64(value, &mut encoded);
        self.write_raw(&encoded)
    }

    /// Write a string with length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_varint(value.len() as u64)?;
        self.write_raw(value.as_bytes())
    }

    /// Bytes written so far, excluding the checksum trailer.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Append the checksum and flush.
    pub fn close(mut self) -> Result<()> {
        let checksum = self.hasher.finalize();
        self.writer.write_u32::<LittleEndian>(checksum)?;
        self.writer.flush_and_sync()
    }
}

/// A structured file reader for binary data.
pub struct StructReader<R: StorageInput> {
    reader: R,
    hasher: Hasher,
    position: u64,
    file_size: u64,
}

impl<R: StorageInput> StructReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        let file_size = reader.size()?;
        if file_size < 4 {
            return Err(WordNetError::index("File too short for checksum"));
        }

        Ok(StructReader {
            reader,
            hasher: Hasher::new(),
            position: 0,
            file_size,
        })
    }

    fn read_raw(&mut self, length: usize) -> Result<Vec<u8>> {
        if self.position + length as u64 > self.payload_size() {
            return Err(WordNetError::index(format!(
                "read of {length} bytes at {} runs past end of data",
                self.position
            )));
        }

        let mut bytes = vec![0u8; length];
        self.reader.read_exact(&mut bytes)?;
        self.hasher.update(&bytes);
        self.position += length as u64;
        Ok(bytes)
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_raw(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a u64 value (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_raw(8)?;
        let mut array = [0u8; 8];
        array.copy_from_slice(&bytes);
        Ok(u64::from_le_bytes(array))
    }

    /// Read a variable-length integer.
    pub fn read_varint(&mut self) -> Result<u64> {
        if self.position >= self.payload_size() {
            return Err(WordNetError::index("varint runs past end of data"));
        }
        let (value, raw) = varint::read_u64(&mut self.reader)?;
        self.hasher.update(&raw);
        self.position += raw.len() as u64;

        if self.position > self.payload_size() {
            return Err(WordNetError::index("varint runs past end of data"));
        }
        Ok(value)
    }

    /// Read a string with length prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_varint()? as usize;
        let bytes = self.read_raw(length)?;

        String::from_utf8(bytes).map_err(|e| WordNetError::index(format!("Invalid UTF-8: {e}")))
    }

    /// Size of the data section, excluding the checksum trailer.
    fn payload_size(&self) -> u64 {
        self.file_size - 4
    }

    /// Bytes of data left before the checksum trailer.
    pub fn remaining(&self) -> u64 {
        self.payload_size().saturating_sub(self.position)
    }

    /// Check that all data has been consumed and the trailer matches.
    pub fn verify_checksum(mut self) -> Result<()> {
        if self.position != self.payload_size() {
            return Err(WordNetError::index(format!(
                "{} trailing bytes before checksum",
                self.payload_size() - self.position
            )));
        }

        let stored = self.reader.read_u32::<LittleEndian>()?;
        let computed = self.hasher.finalize();
        if stored != computed {
            return Err(WordNetError::index(format!(
                "checksum mismatch: stored {stored:#010x}, computed {computed:#010x}"
            )));
        }
        Ok(())
    }
}
