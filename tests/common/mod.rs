//! A small Gujarati-style dump written to a temporary directory.
//!
//! NOUN taxonomy (root 73):
//!
//! ```text
//! 73 astitva
//! ├── 100 vyakti
//! │   ├── 200 mahilaa ── 201 ilaa
//! │   ├── 400 purush
//! │   └── 600 maataa (also under 200)
//! ├── 33884 prithvi
//! └── 500 haath
//! ```
//!
//! VERB forest: 1000 chaalvu over 1001 daudvu and 1002 kudvu; 2000 khaavu
//! over 2001 chaavvu.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use indowordnet::{IndexBuilder, IndexStats, PartOfSpeech, RelationKind, WordNet, WordNetConfig};
use indowordnet::storage::{FileStorage, StorageConfig};
use tempfile::TempDir;

pub const SYNSETS: &[(u64, &str, &str, &str)] = &[
    (73, "astitva", "the state of being", "NOUN"),
    (100, "vyakti", "a human being;vyakti aavyo", "NOUN"),
    (
        200,
        "mahilaa,stree",
        "an adult female person;mahilaa gaay chhe/stree hase chhe",
        "NOUN",
    ),
    (201, "ilaa", "a given name;\\ilaa ghare aavi\\", "NOUN"),
    (33884, "prithvi,ilaa", "the planet we live on", "NOUN"),
    (400, "purush", "an adult male person", "NOUN"),
    (500, "haath", "the hand", "NOUN"),
    (600, "maataa", "a female parent", "NOUN"),
    (1000, "chaalvu", "to move on foot", "VERB"),
    (1001, "daudvu", "to move fast on foot", "VERB"),
    (1002, "kudvu", "to leap", "VERB"),
    (2000, "khaavu", "to take food", "VERB"),
    (2001, "chaavvu", "to grind with the teeth", "VERB"),
    (700, "saaru", "good", "ADJECTIVE"),
    (701, "kharaab", "bad", "ADJECTIVE"),
    (800, "jaldi", "quickly", "ADVERB"),
];

pub const WORDS: &[(&str, u64)] = &[
    ("ilaa", 33884),
    ("ilaa", 201),
    ("mahilaa", 200),
    ("stree", 200),
    ("stree", 200),
    ("vyakti", 100),
    ("astitva", 73),
    ("prithvi", 33884),
    ("purush", 400),
    ("haath", 500),
    ("maataa", 600),
    ("chaalvu", 1000),
    ("daudvu", 1001),
    ("kudvu", 1002),
    ("khaavu", 2000),
    ("chaavvu", 2001),
    ("saaru", 700),
    ("kharaab", 701),
    ("jaldi", 800),
];

/// `(pos, relation, sub-category, rows)`; rows are `(source, target)`.
pub const EDGES: &[(PartOfSpeech, RelationKind, Option<&str>, &[(u64, u64)])] = &[
    (
        PartOfSpeech::Noun,
        RelationKind::Hypernymy,
        None,
        &[
            (100, 73),
            (200, 100),
            (201, 200),
            (33884, 73),
            (400, 100),
            (500, 73),
            (600, 200),
            (600, 100),
        ],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Hyponymy,
        None,
        &[
            (73, 100),
            (73, 33884),
            (73, 500),
            (100, 400),
            (100, 200),
            (100, 600),
            (200, 201),
            (200, 600),
        ],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Antonymy,
        Some("gender"),
        &[(200, 400), (400, 200)],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Antonymy,
        Some("personality"),
        &[(200, 400)],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Meronymy,
        Some("component_object"),
        &[(100, 500)],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Meronymy,
        Some("member_collection"),
        &[(100, 500)],
    ),
    (
        PartOfSpeech::Noun,
        RelationKind::Holonymy,
        Some("component_object"),
        &[(500, 100)],
    ),
    (
        PartOfSpeech::Verb,
        RelationKind::Hypernymy,
        None,
        &[(1001, 1000), (1002, 1000), (2001, 2000)],
    ),
    (
        PartOfSpeech::Verb,
        RelationKind::Troponymy,
        None,
        &[(1000, 1001), (1000, 1002)],
    ),
    (
        PartOfSpeech::Verb,
        RelationKind::Entailment,
        None,
        &[(2000, 2001)],
    ),
    (
        PartOfSpeech::Adjective,
        RelationKind::Antonymy,
        Some("quality"),
        &[(700, 701), (701, 700)],
    ),
];

pub const ALL_POS: [PartOfSpeech; 4] = [
    PartOfSpeech::Noun,
    PartOfSpeech::Verb,
    PartOfSpeech::Adjective,
    PartOfSpeech::Adverb,
];

pub struct Fixture {
    pub dir: TempDir,
    pub config: WordNetConfig,
}

impl Fixture {
    /// Write the dump without building the index.
    pub fn unindexed() -> Self {
        let dir = TempDir::new().unwrap();
        write_dump(dir.path());
        let config = WordNetConfig::new(dir.path());
        Fixture { dir, config }
    }

    /// Write the dump and build its index.
    pub fn new() -> Self {
        let fixture = Self::unindexed();
        fixture.build_index();
        fixture
    }

    pub fn build_index(&self) -> IndexStats {
        let storage = FileStorage::new(self.dir.path(), StorageConfig::default()).unwrap();
        let (_, stats) = IndexBuilder::new(self.config.clone())
            .build(&storage)
            .unwrap();
        stats
    }

    pub fn wordnet(&self) -> WordNet {
        WordNet::open(self.config.clone()).unwrap()
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

fn write_dump(root: &Path) {
    let mut synsets = String::from("synset_id,category,lemmas,gloss,head_word,pos\n");
    for (id, lemmas, gloss, pos) in SYNSETS {
        let head = lemmas.split(',').next().unwrap();
        synsets.push_str(&format!("{id},1,\"{lemmas}\",\"{gloss}\",{head},{pos}\n"));
    }
    fs::write(root.join("tbl_all_gujarati_synset_data.csv"), synsets).unwrap();

    let mut words = String::from("word,synset_id\n");
    for (word, id) in WORDS {
        words.push_str(&format!("{word},{id}\n"));
    }
    fs::write(root.join("gujarati_words.csv"), words).unwrap();

    let relations = root.join("relations");
    fs::create_dir_all(&relations).unwrap();
    for pos in ALL_POS {
        for kind in RelationKind::ALL {
            for partition in kind.partitions(pos, None).unwrap() {
                let header = if kind == RelationKind::Antonymy {
                    "synset_id,word,antonym_id\n"
                } else {
                    "synset_id,target_id\n"
                };
                let mut table = String::from(header);
                for (edge_pos, edge_kind, subcategory, rows) in EDGES {
                    if *edge_pos == pos && *edge_kind == kind && *subcategory == partition.subcategory
                    {
                        for (source, target) in rows.iter() {
                            if kind == RelationKind::Antonymy {
                                table.push_str(&format!("{source},w{source},{target}\n"));
                            } else {
                                table.push_str(&format!("{source},{target}\n"));
                            }
                        }
                    }
                }
                fs::write(relations.join(partition.file_name()), table).unwrap();
            }
        }
    }
}

pub fn ids(synsets: &[indowordnet::Synset]) -> Vec<u64> {
    synsets.iter().map(|synset| synset.id()).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}
