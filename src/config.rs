//! Configuration for opening a lexical database.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordNetError};
use crate::storage::StorageConfig;
use crate::synset::{PartOfSpeech, SynsetId};

/// Root ids of the two hypernym taxonomies that similarity is defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyRoots {
    /// The single stored root of the NOUN taxonomy.
    pub noun_root: SynsetId,
    /// Sentinel id joining the roots of the VERB forest. Never stored.
    pub verb_synthetic_root: SynsetId,
}

impl Default for TaxonomyRoots {
    fn default() -> Self {
        TaxonomyRoots {
            noun_root: 73,
            verb_synthetic_root: 0,
        }
    }
}

/// Where the database lives and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordNetConfig {
    /// Directory holding the synset table, word table and relation tables.
    pub data_dir: PathBuf,

    /// Language name used in the default table names.
    pub language: String,

    /// Overrides `tbl_all_<language>_synset_data.csv`.
    pub synset_data_file: Option<String>,

    /// Overrides `<language>_words.csv`.
    pub words_file: Option<String>,

    /// Directory of relation tables, relative to `data_dir`.
    pub relations_dir: String,

    /// Persisted lemma → synset ids index.
    pub lemma_index_file: String,

    /// Persisted synset id → byte offset index.
    pub offset_index_file: String,

    pub roots: TaxonomyRoots,

    /// Fail when a relation table is missing instead of treating it as empty.
    pub strict_partitions: bool,

    pub storage: StorageConfig,
}

impl Default for WordNetConfig {
    fn default() -> Self {
        WordNetConfig {
            data_dir: PathBuf::from("."),
            language: "gujarati".to_string(),
            synset_data_file: None,
            words_file: None,
            relations_dir: "relations".to_string(),
            lemma_index_file: "words_synid_mapping.idx".to_string(),
            offset_index_file: "synid_fileoffset_mapping.idx".to_string(),
            roots: TaxonomyRoots::default(),
            strict_partitions: true,
            storage: StorageConfig::default(),
        }
    }
}

impl WordNetConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        WordNetConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WordNetError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: WordNetConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_synset_data_file<S: Into<String>>(mut self, name: S) -> Self {
        self.synset_data_file = Some(name.into());
        self
    }

    pub fn with_words_file<S: Into<String>>(mut self, name: S) -> Self {
        self.words_file = Some(name.into());
        self
    }

    pub fn with_roots(mut self, roots: TaxonomyRoots) -> Self {
        self.roots = roots;
        self
    }

    pub fn with_strict_partitions(mut self, strict: bool) -> Self {
        self.strict_partitions = strict;
        self
    }

    pub fn synset_data_file(&self) -> String {
        self.synset_data_file
            .clone()
            .unwrap_or_else(|| format!("tbl_all_{}_synset_data.csv", self.language))
    }

    pub fn words_file(&self) -> String {
        self.words_file
            .clone()
            .unwrap_or_else(|| format!("{}_words.csv", self.language))
    }

    /// Storage-relative path of a relation table.
    pub fn relation_path(&self, file_name: &str) -> String {
        if self.relations_dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.relations_dir.trim_end_matches('/'), file_name)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty()
            && (self.synset_data_file.is_none() || self.words_file.is_none())
        {
            return Err(WordNetError::invalid_config(
                "language must be set unless both table names are overridden",
            ));
        }
        if self.lemma_index_file == self.offset_index_file {
            return Err(WordNetError::invalid_config(
                "lemma and offset index files must differ",
            ));
        }
        if self.roots.noun_root == self.roots.verb_synthetic_root {
            return Err(WordNetError::invalid_config(
                "noun root and verb synthetic root must differ",
            ));
        }
        if self.storage.buffer_size == 0 {
            return Err(WordNetError::invalid_config("buffer_size must be non-zero"));
        }
        Ok(())
    }
}

impl TaxonomyRoots {
    /// Root id used for similarity in `pos`, if similarity is defined there.
    pub fn root_for(&self, pos: PartOfSpeech) -> Option<SynsetId> {
        match pos {
            PartOfSpeech::Noun => Some(self.noun_root),
            PartOfSpeech::Verb => Some(self.verb_synthetic_root),
            PartOfSpeech::Adjective | PartOfSpeech::Adverb => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_names() {
        let config = WordNetConfig::new("/data/iwn");
        assert_eq!(
            config.synset_data_file(),
            "tbl_all_gujarati_synset_data.csv"
        );
        assert_eq!(config.words_file(), "gujarati_words.csv");
        assert_eq!(
            config.relation_path("tbl_noun_hypernymy.csv"),
            "relations/tbl_noun_hypernymy.csv"
        );

        let hindi = config.with_language("hindi");
        assert_eq!(hindi.words_file(), "hindi_words.csv");
    }

    #[test]
    fn test_overrides() {
        let config = WordNetConfig::default()
            .with_synset_data_file("synsets.csv")
            .with_words_file("words.csv");
        assert_eq!(config.synset_data_file(), "synsets.csv");
        assert_eq!(config.words_file(), "words.csv");
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"data_dir": "/srv/iwn", "language": "marathi", "roots": {"noun_root": 1}}"#,
        )
        .unwrap();

        let config = WordNetConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/iwn"));
        assert_eq!(config.language, "marathi");
        assert_eq!(config.roots.noun_root, 1);
        assert_eq!(config.roots.verb_synthetic_root, 0);
        assert!(config.strict_partitions);
    }

    #[test]
    fn test_validate_rejects_colliding_roots() {
        let config = WordNetConfig::default().with_roots(TaxonomyRoots {
            noun_root: 5,
            verb_synthetic_root: 5,
        });
        assert!(matches!(config.validate(), Err(WordNetError::Config(_))));
    }

    #[test]
    fn test_root_for() {
        let roots = TaxonomyRoots::default();
        assert_eq!(roots.root_for(PartOfSpeech::Noun), Some(73));
        assert_eq!(roots.root_for(PartOfSpeech::Verb), Some(0));
        assert_eq!(roots.root_for(PartOfSpeech::Adverb), None);
    }
}
