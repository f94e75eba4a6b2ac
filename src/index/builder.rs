//! One-time construction of the persisted index from the CSV dump.

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::WordNetConfig;
use crate::error::{Result, WordNetError};
use crate::index::LexicalIndex;
use crate::source::record::{is_blank, parse_id};
use crate::storage::Storage;

/// Counts reported after an index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Distinct lemmas in the word table.
    pub lemmas: usize,
    /// Distinct synset ids in the synset table.
    pub synsets: usize,
    /// Word table rows read.
    pub word_rows: usize,
    /// Synset table rows read.
    pub synset_rows: usize,
    /// Rows skipped because they were blank or had no id.
    pub skipped_rows: usize,
}

/// Builds a [`LexicalIndex`] from the word and synset tables and writes it
/// back to the same storage.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: WordNetConfig,
}

impl IndexBuilder {
    pub fn new(config: WordNetConfig) -> Self {
        IndexBuilder { config }
    }

    /// Build the index without persisting it.
    pub fn build_in_memory(&self, storage: &dyn Storage) -> Result<(LexicalIndex, IndexStats)> {
        let mut index = LexicalIndex::new();
        let mut stats = IndexStats::default();

        self.read_words(storage, &mut index, &mut stats)?;
        self.read_offsets(storage, &mut index, &mut stats)?;

        stats.lemmas = index.lemma_count();
        stats.synsets = index.synset_count();
        Ok((index, stats))
    }

    /// Build the index and write both index files.
    pub fn build(&self, storage: &dyn Storage) -> Result<(LexicalIndex, IndexStats)> {
        let (index, stats) = self.build_in_memory(storage)?;
        index.write_to_storage(storage, &self.config)?;
        info!(
            "built index: {} lemmas over {} word rows, {} synsets over {} synset rows",
            stats.lemmas, stats.word_rows, stats.synsets, stats.synset_rows
        );
        Ok((index, stats))
    }

    /// Word table: header row, then `word, synset_id, ...`.
    fn read_words(
        &self,
        storage: &dyn Storage,
        index: &mut LexicalIndex,
        stats: &mut IndexStats,
    ) -> Result<()> {
        let name = self.config.words_file();
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(storage.open_input(&name)?);
        let mut record = StringRecord::new();

        while reader.read_record(&mut record)? {
            stats.word_rows += 1;
            let word = record.get(0).unwrap_or_default().trim();
            if word.is_empty() || is_blank(&record) {
                stats.skipped_rows += 1;
                continue;
            }
            let id = parse_id(record.get(1), "synset id").map_err(|e| {
                WordNetError::parse(format!("{name} line {}: {e}", line_of(&record)))
            })?;
            index.insert_lemma(word, id);
        }

        debug!("read {} word rows from {name}", stats.word_rows);
        Ok(())
    }

    /// Synset table: header row, then one synset per record. The offset is
    /// the byte position where the record starts.
    fn read_offsets(
        &self,
        storage: &dyn Storage,
        index: &mut LexicalIndex,
        stats: &mut IndexStats,
    ) -> Result<()> {
        let name = self.config.synset_data_file();
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(storage.open_input(&name)?);
        let mut record = StringRecord::new();

        while reader.read_record(&mut record)? {
            stats.synset_rows += 1;
            let id_field = record.get(0).unwrap_or_default().trim();
            if id_field.is_empty() {
                stats.skipped_rows += 1;
                continue;
            }
            let id = parse_id(Some(id_field), "synset id").map_err(|e| {
                WordNetError::parse(format!("{name} line {}: {e}", line_of(&record)))
            })?;
            let offset = record
                .position()
                .map(|position| position.byte())
                .ok_or_else(|| WordNetError::index(format!("{name}: record without position")))?;
            index.insert_offset(id, offset);
        }

        debug!("read {} synset rows from {name}", stats.synset_rows);
        Ok(())
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or(0)
}
