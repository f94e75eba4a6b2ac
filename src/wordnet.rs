//! The query facade: synset lookup, relation traversal and similarity.

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, info};

use crate::ancestry::HypernymGraph;
use crate::config::WordNetConfig;
use crate::error::Result;
use crate::index::{IndexBuilder, IndexStats};
use crate::relation::RelationKind;
use crate::similarity::{Comparison, SimilarityEngine, SimilarityMeasure};
use crate::source::{CsvLexicalSource, LexicalSource};
use crate::storage::FileStorage;
use crate::synset::{PartOfSpeech, Synset, SynsetId, SynsetKey};

/// Read-only access to a lexical database.
///
/// Cheap to clone; clones share the underlying source.
#[derive(Debug, Clone)]
pub struct WordNet {
    source: Arc<dyn LexicalSource>,
    config: WordNetConfig,
}

impl WordNet {
    /// Open the database under `config.data_dir` using its persisted index.
    pub fn open(config: WordNetConfig) -> Result<Self> {
        config.validate()?;
        let storage = FileStorage::new(&config.data_dir, config.storage.clone())?;
        let source = CsvLexicalSource::open(Arc::new(storage), &config)?;
        info!("opened {} wordnet at {}", config.language, config.data_dir.display());
        Ok(Self::with_source(Arc::new(source), config))
    }

    /// Build and persist the index for the database under `config.data_dir`.
    pub fn build_index(config: &WordNetConfig) -> Result<IndexStats> {
        config.validate()?;
        let storage = FileStorage::new(&config.data_dir, config.storage.clone())?;
        let (_, stats) = IndexBuilder::new(config.clone()).build(&storage)?;
        Ok(stats)
    }

    pub fn with_source(source: Arc<dyn LexicalSource>, config: WordNetConfig) -> Self {
        WordNet { source, config }
    }

    pub fn config(&self) -> &WordNetConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn LexicalSource> {
        &self.source
    }

    /// All synsets containing `lemma`, in index order.
    pub fn synsets(&self, lemma: &str) -> Result<Vec<Synset>> {
        self.synsets_with_pos(lemma, None)
    }

    /// Synsets containing `lemma`, optionally restricted to one part of speech.
    pub fn synsets_with_pos(&self, lemma: &str, pos: Option<PartOfSpeech>) -> Result<Vec<Synset>> {
        let ids = self.source.lookup_ids_for_lemma(lemma)?;
        let mut synsets = Vec::with_capacity(ids.len());
        for id in ids {
            let synset = self.source.fetch_record(id)?;
            if pos.is_none_or(|pos| synset.pos() == pos) {
                synsets.push(synset);
            }
        }
        Ok(synsets)
    }

    /// Resolve a `headword.POS.id` key or a bare id.
    pub fn synset(&self, key: &str) -> Result<Synset> {
        let key = SynsetKey::parse(key)?;
        self.synset_by_id(key.id)
    }

    pub fn synset_by_id(&self, id: SynsetId) -> Result<Synset> {
        self.source.fetch_record(id)
    }

    /// Targets of `kind` from `synset`.
    ///
    /// Simple relations return targets in table order. Categorized ones scan
    /// every sub-category table (or just `subcategory`) and drop repeats,
    /// keeping first-seen order.
    pub fn relations(
        &self,
        synset: &Synset,
        kind: RelationKind,
        subcategory: Option<&str>,
    ) -> Result<Vec<Synset>> {
        kind.check_eligible(synset.pos())?;
        let partitions = kind.partitions(synset.pos(), subcategory)?;

        let mut ids = Vec::new();
        if kind.is_categorized() {
            let mut seen = AHashSet::new();
            for partition in &partitions {
                for target in self.source.relation_targets(partition, synset.id())? {
                    if seen.insert(target) {
                        ids.push(target);
                    }
                }
            }
        } else {
            for partition in &partitions {
                ids.extend(self.source.relation_targets(partition, synset.id())?);
            }
        }

        debug!("{kind} of {synset}: {} targets", ids.len());
        ids.into_iter()
            .map(|id| self.source.fetch_record(id))
            .collect()
    }

    pub fn hypernymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Hypernymy, None)
    }

    /// Hypernym generations up to `levels` above `synset`.
    ///
    /// Generation 0 is `[synset]`; generation k holds the direct hypernyms
    /// of every member of generation k - 1.
    pub fn hypernymy_levels(&self, synset: &Synset, levels: usize) -> Result<Vec<Vec<Synset>>> {
        RelationKind::Hypernymy.check_eligible(synset.pos())?;

        let mut generations = Vec::with_capacity(levels + 1);
        generations.push(vec![synset.clone()]);
        for _ in 0..levels {
            let mut next = Vec::new();
            if let Some(previous) = generations.last() {
                for member in previous {
                    next.extend(self.hypernymy(member)?);
                }
            }
            generations.push(next);
        }
        Ok(generations)
    }

    pub fn hyponymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Hyponymy, None)
    }

    pub fn antonymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Antonymy, None)
    }

    pub fn meronymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Meronymy, None)
    }

    pub fn holonymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Holonymy, None)
    }

    pub fn entailment(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Entailment, None)
    }

    pub fn troponymy(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.relations(synset, RelationKind::Troponymy, None)
    }

    fn similarity_engine(&self) -> SimilarityEngine<'_, Self> {
        SimilarityEngine::new(self, self.config.roots)
    }

    /// Walk both synsets once; every measure can be read off the result.
    pub fn compare(&self, first: &Synset, second: &Synset) -> Result<Comparison> {
        self.similarity_engine().compare(first, second)
    }

    pub fn similarity_path(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.similarity_engine().path(first, second)
    }

    pub fn similarity_lch(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.similarity_engine().lch(first, second)
    }

    pub fn similarity_wup(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.similarity_engine().wup(first, second)
    }

    pub fn similarity(
        &self,
        measure: SimilarityMeasure,
        first: &Synset,
        second: &Synset,
    ) -> Result<f64> {
        self.similarity_engine().measure(measure, first, second)
    }
}

impl HypernymGraph for WordNet {
    fn hypernyms(&self, synset: &Synset) -> Result<Vec<Synset>> {
        self.hypernymy(synset)
    }
}
