//! Error types for the indowordnet library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`WordNetError`] enum. Lookup and similarity failures caused by caller
//! input get their own variants so they can be matched on; I/O, CSV and
//! index-format failures are carried as ambient variants.
//!
//! # Examples
//!
//! ```
//! use indowordnet::error::{Result, WordNetError};
//!
//! fn lookup(lemma: &str) -> Result<()> {
//!     Err(WordNetError::not_found(format!("lemma '{lemma}'")))
//! }
//!
//! match lookup("xyz") {
//!     Err(WordNetError::NotFound(what)) => assert_eq!(what, "lemma 'xyz'"),
//!     _ => unreachable!(),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::relation::RelationKind;
use crate::synset::PartOfSpeech;

/// The main error type for WordNet operations.
#[derive(Error, Debug)]
pub enum WordNetError {
    /// I/O errors from the underlying files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed CSV in a synset, word or relation table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON configuration or output errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown lemma, synset key or synset id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A relation was queried on a part of speech it is not defined for.
    #[error("Relation {relation} is not valid for {pos} synsets")]
    InvalidRelation {
        relation: RelationKind,
        pos: PartOfSpeech,
    },

    /// Similarity requested on mismatched or unsupported parts of speech.
    #[error("Unsupported synset pair: {0}")]
    UnsupportedPair(String),

    /// Similarity requested on input that collapses the denominator.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The two synsets share no ancestor in the hypernym taxonomy.
    #[error("No common ancestor: {0}")]
    NoCommonAncestor(String),

    /// Storage backend errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted index errors (bad magic, checksum mismatch, dangling offsets).
    #[error("Index error: {0}")]
    Index(String),

    /// A stored record or a user-supplied key could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with WordNetError.
pub type Result<T> = std::result::Result<T, WordNetError>;

impl WordNetError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        WordNetError::NotFound(msg.into())
    }

    /// Create a new invalid relation error.
    pub fn invalid_relation(relation: RelationKind, pos: PartOfSpeech) -> Self {
        WordNetError::InvalidRelation { relation, pos }
    }

    /// Create a new unsupported pair error.
    pub fn unsupported_pair<S: Into<String>>(msg: S) -> Self {
        WordNetError::UnsupportedPair(msg.into())
    }

    /// Create a new degenerate input error.
    pub fn degenerate_input<S: Into<String>>(msg: S) -> Self {
        WordNetError::DegenerateInput(msg.into())
    }

    /// Create a new no common ancestor error.
    pub fn no_common_ancestor<S: Into<String>>(msg: S) -> Self {
        WordNetError::NoCommonAncestor(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        WordNetError::Storage(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        WordNetError::Index(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        WordNetError::Parse(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WordNetError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WordNetError::Config(msg.into())
    }
}
