//! The lexical data source behind [`crate::wordnet::WordNet`].
//!
//! [`LexicalSource`] is the seam between the query layer and the stored
//! tables: look up ids for a lemma, fetch one synset record, scan a
//! relation partition. [`CsvLexicalSource`] implements it over the CSV dump
//! plus the persisted [`crate::index::LexicalIndex`].

pub mod csv_source;
pub mod record;

pub use csv_source::CsvLexicalSource;

use crate::error::Result;
use crate::relation::{EdgePartition, RelationEdge};
use crate::synset::{Synset, SynsetId};

/// Read-only access to a lexical database.
pub trait LexicalSource: Send + Sync + std::fmt::Debug {
    /// Synset ids containing `lemma`, in index order.
    ///
    /// Fails with [`crate::error::WordNetError::NotFound`] for unknown lemmas.
    fn lookup_ids_for_lemma(&self, lemma: &str) -> Result<Vec<SynsetId>>;

    /// Fetch and parse the record of synset `id`.
    fn fetch_record(&self, id: SynsetId) -> Result<Synset>;

    /// Every edge stored in `partition`, in file order.
    fn scan_relation_edges(&self, partition: &EdgePartition) -> Result<Vec<RelationEdge>>;

    /// Targets of the edges in `partition` whose source is `source`, in file order.
    fn relation_targets(&self, partition: &EdgePartition, source: SynsetId) -> Result<Vec<SynsetId>> {
        Ok(self
            .scan_relation_edges(partition)?
            .into_iter()
            .filter(|edge| edge.source == source)
            .map(|edge| edge.target)
            .collect())
    }
}
