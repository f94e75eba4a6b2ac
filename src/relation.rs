//! Relation kinds, part-of-speech eligibility and edge partitions.
//!
//! Edges are stored one CSV table per `(pos, relation[, sub-category])`.
//! Antonymy, meronymy and holonymy are split into sub-category tables and
//! are resolved by scanning every one of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordNetError};
use crate::synset::{PartOfSpeech, SynsetId};

/// Antonymy sub-categories.
pub const ANTONYMY_CATEGORIES: [&str; 12] = [
    "action",
    "personality",
    "amount",
    "place",
    "colour",
    "quality",
    "direction",
    "size",
    "gender",
    "state",
    "manner",
    "time",
];

/// Meronymy and holonymy sub-categories.
pub const PART_WHOLE_CATEGORIES: [&str; 9] = [
    "component_object",
    "feature_activity",
    "member_collection",
    "phase_state",
    "place_area",
    "portion_mass",
    "position_area",
    "resource_process",
    "stuff_object",
];

/// Semantic relation between synsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Hypernymy,
    Hyponymy,
    Antonymy,
    Meronymy,
    Holonymy,
    Entailment,
    Troponymy,
}

impl RelationKind {
    pub const ALL: [RelationKind; 7] = [
        RelationKind::Hypernymy,
        RelationKind::Hyponymy,
        RelationKind::Antonymy,
        RelationKind::Meronymy,
        RelationKind::Holonymy,
        RelationKind::Entailment,
        RelationKind::Troponymy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Hypernymy => "hypernymy",
            RelationKind::Hyponymy => "hyponymy",
            RelationKind::Antonymy => "antonymy",
            RelationKind::Meronymy => "meronymy",
            RelationKind::Holonymy => "holonymy",
            RelationKind::Entailment => "entailment",
            RelationKind::Troponymy => "troponymy",
        }
    }

    /// Parts of speech this relation may not be queried on.
    pub fn invalid_for(&self) -> &'static [PartOfSpeech] {
        use PartOfSpeech::*;

        match self {
            RelationKind::Hypernymy => &[Adjective, Adverb],
            RelationKind::Hyponymy => &[Adjective, Adverb, Verb],
            RelationKind::Entailment => &[Adjective, Adverb, Noun],
            RelationKind::Troponymy => &[Adjective, Adverb, Noun],
            RelationKind::Meronymy => &[Adjective, Adverb, Verb],
            RelationKind::Holonymy => &[Adjective, Adverb, Verb],
            RelationKind::Antonymy => &[],
        }
    }

    /// Fail with [`WordNetError::InvalidRelation`] if `pos` is ineligible.
    pub fn check_eligible(&self, pos: PartOfSpeech) -> Result<()> {
        if self.invalid_for().contains(&pos) {
            Err(WordNetError::invalid_relation(*self, pos))
        } else {
            Ok(())
        }
    }

    /// Sub-categories for categorized relations, `None` for simple ones.
    pub fn subcategories(&self) -> Option<&'static [&'static str]> {
        match self {
            RelationKind::Antonymy => Some(&ANTONYMY_CATEGORIES),
            RelationKind::Meronymy | RelationKind::Holonymy => Some(&PART_WHOLE_CATEGORIES),
            _ => None,
        }
    }

    pub fn is_categorized(&self) -> bool {
        self.subcategories().is_some()
    }

    /// Table name fragment for categorized relations.
    fn table_prefix(&self) -> &'static str {
        match self {
            RelationKind::Antonymy => "anto",
            RelationKind::Meronymy => "mero",
            RelationKind::Holonymy => "holo",
            other => other.as_str(),
        }
    }

    /// Column holding the target id in this relation's tables.
    pub fn target_column(&self) -> usize {
        match self {
            RelationKind::Antonymy => 2,
            _ => 1,
        }
    }

    /// Partitions to scan for `pos`, optionally narrowed to one sub-category.
    pub fn partitions(
        &self,
        pos: PartOfSpeech,
        subcategory: Option<&str>,
    ) -> Result<Vec<EdgePartition>> {
        match (self.subcategories(), subcategory) {
            (None, None) => Ok(vec![EdgePartition {
                pos,
                kind: *self,
                subcategory: None,
            }]),
            (None, Some(category)) => Err(WordNetError::invalid_argument(format!(
                "relation {self} has no sub-categories (got '{category}')"
            ))),
            (Some(categories), None) => Ok(categories
                .iter()
                .map(|category| EdgePartition {
                    pos,
                    kind: *self,
                    subcategory: Some(*category),
                })
                .collect()),
            (Some(categories), Some(category)) => {
                let found = categories
                    .iter()
                    .find(|c| **c == category)
                    .ok_or_else(|| {
                        WordNetError::invalid_argument(format!(
                            "unknown {self} sub-category '{category}'"
                        ))
                    })?;
                Ok(vec![EdgePartition {
                    pos,
                    kind: *self,
                    subcategory: Some(*found),
                }])
            }
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = WordNetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| WordNetError::parse(format!("unknown relation '{s}'")))
    }
}

/// One stored edge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgePartition {
    pub pos: PartOfSpeech,
    pub kind: RelationKind,
    pub subcategory: Option<&'static str>,
}

impl EdgePartition {
    /// File name of this partition, relative to the relations directory.
    pub fn file_name(&self) -> String {
        match self.subcategory {
            Some(category) => format!(
                "tbl_{}_{}_{}.csv",
                self.pos.table_name(),
                self.kind.table_prefix(),
                category
            ),
            None => format!("tbl_{}_{}.csv", self.pos.table_name(), self.kind.as_str()),
        }
    }

    pub fn target_column(&self) -> usize {
        self.kind.target_column()
    }
}

impl fmt::Display for EdgePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// A directed edge read from a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEdge {
    pub source: SynsetId,
    pub target: SynsetId,
}
