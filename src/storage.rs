//! Storage abstraction for the lexical database.
//!
//! The synset table, word table, relation tables and persisted index files
//! are all read through the [`Storage`] trait, so the same database can be
//! served from a directory on disk ([`FileStorage`]) or from memory
//! ([`MemoryStorage`], used by tests and benchmarks).
//!
//! File names are relative to the storage root and may contain `/`, e.g.
//! `relations/tbl_noun_hypernymy.csv`.

pub mod file;
pub mod memory;
pub mod structured;
pub mod traits;

pub use file::*;
pub use memory::*;
pub use structured::*;
pub use traits::*;
