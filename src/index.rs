//! Persisted lookup index over the synset and word tables.
//!
//! Two maps are built once by [`IndexBuilder`] and loaded at open time:
//! lemma → synset ids (in word-table order) and synset id → byte offset of
//! the synset's row in the synset table. Both are written with
//! [`StructWriter`] and carry a magic number, a format version and a CRC32
//! trailer.

pub mod builder;

pub use builder::{IndexBuilder, IndexStats};

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::debug;

use crate::config::WordNetConfig;
use crate::error::{Result, WordNetError};
use crate::storage::{Storage, StorageInput, StructReader, StructWriter};
use crate::synset::SynsetId;

const LEMMA_INDEX_MAGIC: u32 = 0x494c_4d58; // "ILMX"
const OFFSET_INDEX_MAGIC: u32 = 0x494f_4658; // "IOFX"
const INDEX_VERSION: u32 = 1;

/// In-memory form of the two lookup maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalIndex {
    lemmas: AHashMap<String, Vec<SynsetId>>,
    offsets: AHashMap<SynsetId, u64>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `lemma` belongs to synset `id`. Repeated pairs are ignored.
    pub fn insert_lemma(&mut self, lemma: &str, id: SynsetId) {
        let ids = self.lemmas.entry(lemma.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Record the byte offset of synset `id`'s row. Later rows win.
    pub fn insert_offset(&mut self, id: SynsetId, offset: u64) {
        self.offsets.insert(id, offset);
    }

    pub fn ids_for_lemma(&self, lemma: &str) -> Option<&[SynsetId]> {
        self.lemmas.get(lemma).map(Vec::as_slice)
    }

    pub fn offset_of(&self, id: SynsetId) -> Option<u64> {
        self.offsets.get(&id).copied()
    }

    pub fn contains_synset(&self, id: SynsetId) -> bool {
        self.offsets.contains_key(&id)
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    pub fn synset_count(&self) -> usize {
        self.offsets.len()
    }

    /// Write both index files. Entries are sorted so output is reproducible.
    pub fn write_to_storage(&self, storage: &dyn Storage, config: &WordNetConfig) -> Result<()> {
        let mut writer = StructWriter::new(storage.create_output(&config.lemma_index_file)?);
        writer.write_u32(LEMMA_INDEX_MAGIC)?;
        writer.write_u32(INDEX_VERSION)?;
        writer.write_varint(self.lemmas.len() as u64)?;
        let sorted: BTreeMap<&String, &Vec<SynsetId>> = self.lemmas.iter().collect();
        for (lemma, ids) in sorted {
            writer.write_string(lemma)?;
            writer.write_varint(ids.len() as u64)?;
            for id in ids {
                writer.write_varint(*id)?;
            }
        }
        debug!(
            "wrote {} lemmas ({} bytes) to {}",
            self.lemmas.len(),
            writer.position(),
            config.lemma_index_file
        );
        writer.close()?;

        let mut writer = StructWriter::new(storage.create_output(&config.offset_index_file)?);
        writer.write_u32(OFFSET_INDEX_MAGIC)?;
        writer.write_u32(INDEX_VERSION)?;
        writer.write_varint(self.offsets.len() as u64)?;
        let sorted: BTreeMap<&SynsetId, &u64> = self.offsets.iter().collect();
        for (id, offset) in sorted {
            writer.write_varint(*id)?;
            writer.write_u64(*offset)?;
        }
        debug!(
            "wrote {} offsets ({} bytes) to {}",
            self.offsets.len(),
            writer.position(),
            config.offset_index_file
        );
        writer.close()
    }

    /// Load both index files, verifying headers and checksums.
    pub fn read_from_storage(storage: &dyn Storage, config: &WordNetConfig) -> Result<Self> {
        let mut index = LexicalIndex::new();

        let mut reader = open_index(storage, &config.lemma_index_file, LEMMA_INDEX_MAGIC)?;
        let count = reader.read_varint()?;
        index.lemmas.reserve(capacity_hint(count, &reader));
        for _ in 0..count {
            let lemma = reader.read_string()?;
            let id_count = reader.read_varint()?;
            let mut ids = Vec::with_capacity(capacity_hint(id_count, &reader));
            for _ in 0..id_count {
                ids.push(reader.read_varint()?);
            }
            index.lemmas.insert(lemma, ids);
        }
        reader.verify_checksum()?;

        let mut reader = open_index(storage, &config.offset_index_file, OFFSET_INDEX_MAGIC)?;
        let count = reader.read_varint()?;
        index.offsets.reserve(capacity_hint(count, &reader));
        for _ in 0..count {
            let id = reader.read_varint()?;
            let offset = reader.read_u64()?;
            index.offsets.insert(id, offset);
        }
        reader.verify_checksum()?;

        debug!(
            "loaded index: {} lemmas, {} synsets",
            index.lemma_count(),
            index.synset_count()
        );
        Ok(index)
    }
}

/// Every entry takes at least one byte, so a stored count larger than the
/// bytes left is corrupt and must not size an allocation.
fn capacity_hint<R: StorageInput>(count: u64, reader: &StructReader<R>) -> usize {
    usize::try_from(count.min(reader.remaining())).unwrap_or(0)
}

fn open_index(
    storage: &dyn Storage,
    name: &str,
    magic: u32,
) -> Result<StructReader<Box<dyn StorageInput>>> {
    if !storage.file_exists(name) {
        return Err(WordNetError::index(format!(
            "index file {name} is missing; run build-index first"
        )));
    }

    let mut reader = StructReader::new(storage.open_input(name)?)?;
    let found = reader.read_u32()?;
    if found != magic {
        return Err(WordNetError::index(format!(
            "{name}: bad magic number {found:#010x}"
        )));
    }
    let version = reader.read_u32()?;
    if version != INDEX_VERSION {
        return Err(WordNetError::index(format!(
            "{name}: unsupported index version {version}"
        )));
    }
    Ok(reader)
}
