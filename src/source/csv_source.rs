//! [`LexicalSource`] over the CSV dump and the persisted index.

use std::io::{Seek, SeekFrom};
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};

use crate::config::WordNetConfig;
use crate::error::{Result, WordNetError};
use crate::index::LexicalIndex;
use crate::relation::{EdgePartition, RelationEdge};
use crate::source::LexicalSource;
use crate::source::record::{is_blank, parse_id, parse_synset_record};
use crate::storage::{Storage, StorageInput};
use crate::synset::{Synset, SynsetId};

/// Serves synsets by seeking into the synset table at indexed offsets and
/// relations by scanning the relation tables.
///
/// The index is loaded once and never mutated; each call opens its own
/// input, so one source can be shared across threads.
#[derive(Debug)]
pub struct CsvLexicalSource {
    storage: Arc<dyn Storage>,
    index: LexicalIndex,
    synset_data_file: String,
    config: WordNetConfig,
}

impl CsvLexicalSource {
    pub fn new(storage: Arc<dyn Storage>, index: LexicalIndex, config: &WordNetConfig) -> Self {
        CsvLexicalSource {
            storage,
            index,
            synset_data_file: config.synset_data_file(),
            config: config.clone(),
        }
    }

    /// Load the persisted index from `storage` and wrap it.
    pub fn open(storage: Arc<dyn Storage>, config: &WordNetConfig) -> Result<Self> {
        let index = LexicalIndex::read_from_storage(storage.as_ref(), config)?;
        info!(
            "opened lexical source: {} lemmas, {} synsets",
            index.lemma_count(),
            index.synset_count()
        );
        Ok(Self::new(storage, index, config))
    }

    pub fn index(&self) -> &LexicalIndex {
        &self.index
    }

    /// Open a partition's table, or `None` if it is missing and missing
    /// tables are tolerated.
    fn open_partition(&self, partition: &EdgePartition) -> Result<Option<Box<dyn StorageInput>>> {
        let path = self.config.relation_path(&partition.file_name());
        if !self.config.strict_partitions && !self.storage.file_exists(&path) {
            warn!("relation table {path} is missing, treating it as empty");
            return Ok(None);
        }
        Ok(Some(self.storage.open_input(&path)?))
    }

    /// Stream the edges of `partition` into `visit`.
    fn for_each_edge<F>(&self, partition: &EdgePartition, mut visit: F) -> Result<()>
    where
        F: FnMut(RelationEdge),
    {
        let Some(input) = self.open_partition(partition)? else {
            return Ok(());
        };

        let target_column = partition.target_column();
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
        let mut record = StringRecord::new();
        let mut rows = 0usize;

        while reader.read_record(&mut record)? {
            if is_blank(&record) {
                continue;
            }
            let source = parse_id(record.get(0), "source id")
                .map_err(|e| WordNetError::parse(format!("{partition}: {e}")))?;
            let target = parse_id(record.get(target_column), "target id")
                .map_err(|e| WordNetError::parse(format!("{partition}: {e}")))?;
            visit(RelationEdge { source, target });
            rows += 1;
        }

        debug!("scanned {rows} edges from {partition}");
        Ok(())
    }
}

impl LexicalSource for CsvLexicalSource {
    fn lookup_ids_for_lemma(&self, lemma: &str) -> Result<Vec<SynsetId>> {
        self.index
            .ids_for_lemma(lemma)
            .map(<[SynsetId]>::to_vec)
            .ok_or_else(|| WordNetError::not_found(format!("lemma '{lemma}'")))
    }

    fn fetch_record(&self, id: SynsetId) -> Result<Synset> {
        let offset = self
            .index
            .offset_of(id)
            .ok_or_else(|| WordNetError::not_found(format!("synset id {id}")))?;

        let mut input = self.storage.open_input(&self.synset_data_file)?;
        input.seek(SeekFrom::Start(offset))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let mut record = StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(WordNetError::index(format!(
                "offset {offset} of synset {id} is past the end of {}",
                self.synset_data_file
            )));
        }

        let synset = parse_synset_record(&record)?;
        if synset.id() != id {
            return Err(WordNetError::index(format!(
                "offset {offset} points at synset {} instead of {id}; rebuild the index",
                synset.id()
            )));
        }
        Ok(synset)
    }

    fn scan_relation_edges(&self, partition: &EdgePartition) -> Result<Vec<RelationEdge>> {
        let mut edges = Vec::new();
        self.for_each_edge(partition, |edge| edges.push(edge))?;
        Ok(edges)
    }

    fn relation_targets(&self, partition: &EdgePartition, source: SynsetId) -> Result<Vec<SynsetId>> {
        let mut targets = Vec::new();
        self.for_each_edge(partition, |edge| {
            if edge.source == source {
                targets.push(edge.target);
            }
        })?;
        Ok(targets)
    }
}
