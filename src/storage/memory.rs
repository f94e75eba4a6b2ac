//! In-memory storage implementation for testing and benchmarks.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::storage::traits::{Storage, StorageConfig, StorageError, StorageInput, StorageOutput};

type FileMap = Arc<RwLock<HashMap<String, Arc<[u8]>>>>;

/// An in-memory storage implementation.
///
/// File contents are immutable `Arc<[u8]>` snapshots, so opening an input is
/// a reference-count bump and readers never block each other.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    files: FileMap,
    #[allow(dead_code)]
    config: StorageConfig,
}

impl MemoryStorage {
    /// Create a new memory storage.
    pub fn new(config: StorageConfig) -> Self {
        MemoryStorage {
            files: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Create a new memory storage with default configuration.
    pub fn new_default() -> Self {
        Self::new(StorageConfig::default())
    }

    /// Store `data` under `name`, replacing any previous contents.
    pub fn put(&self, name: &str, data: impl AsRef<[u8]>) {
        self.files
            .write()
            .insert(name.to_string(), Arc::from(data.as_ref()));
    }

    /// Get the number of files stored.
    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new_default()
    }
}

impl Storage for MemoryStorage {
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
        let data = self
            .files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(name.to_string()))?;

        Ok(Box::new(MemoryInput {
            cursor: Cursor::new(data),
        }))
    }

    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
        Ok(Box::new(MemoryOutput {
            name: name.to_string(),
            buffer: Vec::new(),
            files: Arc::clone(&self.files),
        }))
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.read().contains_key(name)
    }

    fn file_size(&self, name: &str) -> Result<u64> {
        self.files
            .read()
            .get(name)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StorageError::FileNotFound(name.to_string()).into())
    }
}

/// A memory-based input implementation.
#[derive(Debug)]
pub struct MemoryInput {
    cursor: Cursor<Arc<[u8]>>,
}

impl Read for MemoryInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for MemoryInput {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl StorageInput for MemoryInput {
    fn size(&self) -> Result<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }
}

/// A memory-based output. Contents become visible on flush and on drop.
#[derive(Debug)]
pub struct MemoryOutput {
    name: String,
    buffer: Vec<u8>,
    files: FileMap,
}

impl MemoryOutput {
    fn publish(&self) {
        self.files
            .write()
            .insert(self.name.clone(), Arc::from(self.buffer.as_slice()));
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl StorageOutput for MemoryOutput {
    fn flush_and_sync(&mut self) -> Result<()> {
        self.publish();
        Ok(())
    }

    fn position(&self) -> u64 {
        self.buffer.len() as u64
    }
}

impl Drop for MemoryOutput {
    fn drop(&mut self) {
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_read() {
        let storage = MemoryStorage::new_default();
        storage.put("words.csv", "word,synset_id\nilaa,201\n");

        assert!(storage.file_exists("words.csv"));
        assert_eq!(storage.file_size("words.csv").unwrap(), 24);

        let mut input = storage.open_input("words.csv").unwrap();
        input.seek(SeekFrom::Start(15)).unwrap();
        let mut rest = String::new();
        input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "ilaa,201\n");
    }

    #[test]
    fn test_output_published_on_drop() {
        let storage = MemoryStorage::new_default();
        {
            let mut output = storage.create_output("index.idx").unwrap();
            output.write_all(&[1, 2, 3]).unwrap();
            assert_eq!(output.position(), 3);
            assert!(!storage.file_exists("index.idx"));
        }

        assert!(storage.file_exists("index.idx"));
        assert_eq!(storage.file_count(), 1);
    }

    #[test]
    fn test_concurrent_inputs_have_independent_cursors() {
        let storage = MemoryStorage::new_default();
        storage.put("data", "abcdef");

        let mut first = storage.open_input("data").unwrap();
        let mut second = storage.open_input("data").unwrap();
        first.seek(SeekFrom::Start(4)).unwrap();

        let mut buf = [0u8; 2];
        second.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ab");
        first.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ef");
    }

    #[test]
    fn test_missing_file() {
        let storage = MemoryStorage::new_default();
        assert!(storage.open_input("nope").is_err());
        assert!(storage.file_size("nope").is_err());
    }
}
