//! # indowordnet
//!
//! Read-only access to an IndoWordNet lexical database dump.
//!
//! ## Features
//!
//! - Lemma and synset-key lookup backed by a persisted offset index
//! - Hypernymy, hyponymy, antonymy, meronymy, holonymy, entailment and
//!   troponymy traversal with part-of-speech eligibility checks
//! - Path, Leacock-Chodorow and Wu-Palmer similarity over the NOUN taxonomy
//!   and the VERB forest
//! - Pluggable storage backends
//!
//! ```no_run
//! use indowordnet::{WordNet, WordNetConfig};
//!
//! let wordnet = WordNet::open(WordNetConfig::new("/srv/iwn"))?;
//! let synsets = wordnet.synsets("ilaa")?;
//! let score = wordnet.similarity_path(&synsets[0], &synsets[1])?;
//! # Ok::<(), indowordnet::WordNetError>(())
//! ```

pub mod ancestry;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod relation;
pub mod similarity;
pub mod source;
pub mod storage;
pub mod synset;
pub mod util;
pub mod wordnet;

pub use ancestry::{AncestorDistances, HypernymGraph, Taxonomy, ancestor_distances};
pub use config::{TaxonomyRoots, WordNetConfig};
pub use error::{Result, WordNetError};
pub use index::{IndexBuilder, IndexStats, LexicalIndex};
pub use relation::{EdgePartition, RelationEdge, RelationKind};
pub use similarity::{Comparison, SimilarityEngine, SimilarityMeasure, Subsumer};
pub use source::{CsvLexicalSource, LexicalSource};
pub use synset::{Lemma, PartOfSpeech, Synset, SynsetId, SynsetKey};
pub use wordnet::WordNet;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
