//! Command line argument parsing for the indowordnet CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::similarity::SimilarityMeasure;

/// indowordnet - query an IndoWordNet lexical database
#[derive(Parser, Debug, Clone)]
#[command(name = "indowordnet")]
#[command(about = "Look up synsets, walk relations and score similarity in an IndoWordNet dump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WordNetArgs {
    /// Verbosity level (repeat for more output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Directory holding the CSV dump and index files
    #[arg(short = 'd', long, env = "INDOWORDNET_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Language of the dump (selects the default table names)
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WordNetArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the lemma and offset index files from the CSV dump
    #[command(name = "build-index")]
    BuildIndex,

    /// List the synsets of a word
    Synsets(SynsetsArgs),

    /// Show one synset
    Synset(SynsetArgs),

    /// Follow a relation from a synset
    Relation(RelationArgs),

    /// Score the similarity of two synsets
    Similarity(SimilarityArgs),

    /// Show index statistics
    Stats,
}

/// Arguments for listing the synsets of a word
#[derive(Parser, Debug, Clone)]
pub struct SynsetsArgs {
    /// Surface form to look up
    #[arg(value_name = "LEMMA")]
    pub lemma: String,

    /// Only return synsets of this part of speech
    #[arg(short, long)]
    pub pos: Option<PosArg>,
}

/// Arguments for showing a synset
#[derive(Parser, Debug, Clone)]
pub struct SynsetArgs {
    /// Synset key (headword.POS.id) or bare id
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Arguments for relation traversal
#[derive(Parser, Debug, Clone)]
pub struct RelationArgs {
    /// Synset key (headword.POS.id) or bare id
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Relation to follow
    #[arg(value_name = "RELATION")]
    pub relation: RelationArg,

    /// Number of hypernym generations to expand (hypernymy only)
    #[arg(long)]
    pub level: Option<usize>,

    /// Restrict a categorized relation to one sub-category
    #[arg(short, long)]
    pub subcategory: Option<String>,
}

/// Arguments for similarity scoring
#[derive(Parser, Debug, Clone)]
pub struct SimilarityArgs {
    /// First synset key
    #[arg(value_name = "KEY_A")]
    pub first: String,

    /// Second synset key
    #[arg(value_name = "KEY_B")]
    pub second: String,

    /// Similarity measure
    #[arg(short, long, default_value = "all")]
    pub measure: MeasureArg,
}

/// Parts of speech accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosArg {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl From<PosArg> for crate::synset::PartOfSpeech {
    fn from(pos: PosArg) -> Self {
        match pos {
            PosArg::Noun => crate::synset::PartOfSpeech::Noun,
            PosArg::Verb => crate::synset::PartOfSpeech::Verb,
            PosArg::Adjective => crate::synset::PartOfSpeech::Adjective,
            PosArg::Adverb => crate::synset::PartOfSpeech::Adverb,
        }
    }
}

/// Relations accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationArg {
    Hypernymy,
    Hyponymy,
    Antonymy,
    Meronymy,
    Holonymy,
    Entailment,
    Troponymy,
}

impl From<RelationArg> for crate::relation::RelationKind {
    fn from(relation: RelationArg) -> Self {
        use crate::relation::RelationKind;

        match relation {
            RelationArg::Hypernymy => RelationKind::Hypernymy,
            RelationArg::Hyponymy => RelationKind::Hyponymy,
            RelationArg::Antonymy => RelationKind::Antonymy,
            RelationArg::Meronymy => RelationKind::Meronymy,
            RelationArg::Holonymy => RelationKind::Holonymy,
            RelationArg::Entailment => RelationKind::Entailment,
            RelationArg::Troponymy => RelationKind::Troponymy,
        }
    }
}

/// Similarity measures accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureArg {
    /// Shortest-path similarity
    Path,
    /// Leacock-Chodorow similarity
    Lch,
    /// Wu-Palmer similarity
    Wup,
    /// All three measures
    All,
}

impl MeasureArg {
    /// Measures to compute for this selection
    pub fn measures(&self) -> Vec<SimilarityMeasure> {
        match self {
            MeasureArg::Path => vec![SimilarityMeasure::Path],
            MeasureArg::Lch => vec![SimilarityMeasure::LeacockChodorow],
            MeasureArg::Wup => vec![SimilarityMeasure::WuPalmer],
            MeasureArg::All => SimilarityMeasure::ALL.to_vec(),
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
