//! Synsets, lemmas and synset keys.
//!
//! A [`Synset`] is an immutable value built from one row of the synset
//! table. Every fetch constructs a fresh value, so two fetches of the same
//! id compare equal but are not the same object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordNetError};

/// Numeric synset identifier, assigned by the database dump.
pub type SynsetId = u64;

/// Part of speech of a synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Tag as stored in the synset table (`NOUN`, `VERB`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Adverb => "ADVERB",
        }
    }

    /// Lower-case form used in relation table names.
    pub fn table_name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = WordNetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOUN" => Ok(PartOfSpeech::Noun),
            "VERB" => Ok(PartOfSpeech::Verb),
            "ADJECTIVE" => Ok(PartOfSpeech::Adjective),
            "ADVERB" => Ok(PartOfSpeech::Adverb),
            other => Err(WordNetError::parse(format!(
                "unknown part of speech '{other}'"
            ))),
        }
    }
}

/// A set of interchangeable word senses sharing one meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    id: SynsetId,
    pos: PartOfSpeech,
    head_word: String,
    lemma_names: Vec<String>,
    gloss: String,
    examples: Vec<String>,
}

impl Synset {
    /// Create a synset from its parts.
    pub fn new(
        id: SynsetId,
        pos: PartOfSpeech,
        head_word: impl Into<String>,
        lemma_names: Vec<String>,
        gloss: impl Into<String>,
        examples: Vec<String>,
    ) -> Self {
        Synset {
            id,
            pos,
            head_word: head_word.into(),
            lemma_names,
            gloss: gloss.into(),
            examples,
        }
    }

    pub fn id(&self) -> SynsetId {
        self.id
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    pub fn head_word(&self) -> &str {
        &self.head_word
    }

    pub fn lemma_names(&self) -> &[String] {
        &self.lemma_names
    }

    /// Lemma views over this synset's lemma list.
    pub fn lemmas(&self) -> Vec<Lemma<'_>> {
        self.lemma_names
            .iter()
            .map(|name| Lemma {
                synset: self,
                name: name.as_str(),
            })
            .collect()
    }

    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// The `headword.POS.id` key identifying this synset.
    pub fn key(&self) -> SynsetKey {
        SynsetKey {
            head_word: Some(self.head_word.clone()),
            pos: Some(self.pos),
            id: self.id,
        }
    }
}

impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.head_word, self.pos, self.id)
    }
}

/// One surface form of a synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lemma<'a> {
    synset: &'a Synset,
    name: &'a str,
}

impl<'a> Lemma<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn synset(&self) -> &'a Synset {
        self.synset
    }
}

impl fmt::Display for Lemma<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.synset, self.name)
    }
}

/// A parsed synset key.
///
/// Accepts either `headword.POS.id` or a bare numeric id. Only the id is
/// used for lookup; the key is split from the right so head words may
/// themselves contain dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynsetKey {
    pub head_word: Option<String>,
    pub pos: Option<PartOfSpeech>,
    pub id: SynsetId,
}

impl SynsetKey {
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        if let Ok(id) = key.parse::<SynsetId>() {
            return Ok(SynsetKey {
                head_word: None,
                pos: None,
                id,
            });
        }

        let mut parts = key.rsplitn(3, '.');
        let (Some(id), Some(pos), Some(head_word)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(WordNetError::parse(format!(
                "synset key '{key}' is not of the form headword.POS.id"
            )));
        };

        let id = id
            .parse::<SynsetId>()
            .map_err(|e| WordNetError::parse(format!("synset key '{key}': bad id: {e}")))?;

        Ok(SynsetKey {
            head_word: Some(head_word.to_string()),
            pos: Some(pos.parse()?),
            id,
        })
    }
}

impl FromStr for SynsetKey {
    type Err = WordNetError;

    fn from_str(s: &str) -> Result<Self> {
        SynsetKey::parse(s)
    }
}

impl fmt::Display for SynsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.head_word, &self.pos) {
            (Some(head_word), Some(pos)) => write!(f, "{head_word}.{pos}.{}", self.id),
            _ => write!(f, "{}", self.id),
        }
    }
}
