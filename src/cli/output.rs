//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WordNetArgs};
use crate::error::Result;
use crate::index::IndexStats;
use crate::synset::{Synset, SynsetId};

/// Rendering for the human output format.
pub trait HumanFormat {
    fn format_human(&self) -> String;
}

/// A synset as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynsetView {
    pub key: String,
    pub id: SynsetId,
    pub pos: String,
    pub head_word: String,
    pub lemmas: Vec<String>,
    pub gloss: String,
    pub examples: Vec<String>,
}

impl From<&Synset> for SynsetView {
    fn from(synset: &Synset) -> Self {
        SynsetView {
            key: synset.to_string(),
            id: synset.id(),
            pos: synset.pos().to_string(),
            head_word: synset.head_word().to_string(),
            lemmas: synset.lemma_names().to_vec(),
            gloss: synset.gloss().to_string(),
            examples: synset.examples().to_vec(),
        }
    }
}

impl HumanFormat for SynsetView {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.key);
        let _ = writeln!(out, "  lemmas: {}", self.lemmas.join(", "));
        if !self.gloss.is_empty() {
            let _ = writeln!(out, "  gloss: {}", self.gloss);
        }
        for example in &self.examples {
            let _ = writeln!(out, "  example: {example}");
        }
        out
    }
}

/// Result of a lemma lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SynsetList {
    pub lemma: String,
    pub synsets: Vec<SynsetView>,
}

impl HumanFormat for SynsetList {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} synset(s) for '{}'", self.synsets.len(), self.lemma);
        for synset in &self.synsets {
            out.push('\n');
            out.push_str(&synset.format_human());
        }
        out
    }
}

/// Result of a relation query.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelationResult {
    pub synset: String,
    pub relation: String,
    pub subcategory: Option<String>,
    pub targets: Vec<SynsetView>,
}

impl HumanFormat for RelationResult {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "{} of {}", self.relation, self.synset);
        if let Some(subcategory) = &self.subcategory {
            let _ = write!(out, " ({subcategory})");
        }
        let _ = writeln!(out, ": {} target(s)", self.targets.len());
        for target in &self.targets {
            let _ = writeln!(out, "  {}", target.key);
        }
        out
    }
}

/// Hypernym generations above a synset.
#[derive(Debug, Serialize, Deserialize)]
pub struct HypernymLevels {
    pub synset: String,
    pub levels: Vec<Vec<String>>,
}

impl HumanFormat for HypernymLevels {
    fn format_human(&self) -> String {
        let mut out = String::new();
        for (level, members) in self.levels.iter().enumerate() {
            let members = if members.is_empty() {
                "-".to_string()
            } else {
                members.join(", ")
            };
            let _ = writeln!(out, "{level}: {members}");
        }
        out
    }
}

/// One similarity score, or the reason it could not be computed.
#[derive(Debug, Serialize, Deserialize)]
pub struct Score {
    pub measure: String,
    pub value: Option<f64>,
    pub error: Option<String>,
}

/// Result of a similarity query.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub first: String,
    pub second: String,
    pub lcs: SynsetId,
    pub distance_sum: u32,
    pub scores: Vec<Score>,
}

impl HumanFormat for SimilarityResult {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ~ {}", self.first, self.second);
        let _ = writeln!(
            out,
            "  lowest common subsumer: {} (summed distance {})",
            self.lcs, self.distance_sum
        );
        for score in &self.scores {
            match (score.value, &score.error) {
                (Some(value), _) => {
                    let _ = writeln!(out, "  {}: {value:.6}", score.measure);
                }
                (None, Some(error)) => {
                    let _ = writeln!(out, "  {}: n/a ({error})", score.measure);
                }
                (None, None) => {
                    let _ = writeln!(out, "  {}: n/a", score.measure);
                }
            }
        }
        out
    }
}

/// Result of an index build.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexBuildResult {
    pub data_dir: String,
    pub stats: IndexStats,
}

impl HumanFormat for IndexBuildResult {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Index built in {}", self.data_dir);
        let _ = writeln!(out, "Lemmas: {}", self.stats.lemmas);
        let _ = writeln!(out, "Synsets: {}", self.stats.synsets);
        let _ = writeln!(out, "Word rows read: {}", self.stats.word_rows);
        let _ = writeln!(out, "Synset rows read: {}", self.stats.synset_rows);
        let _ = writeln!(out, "Rows skipped: {}", self.stats.skipped_rows);
        out
    }
}

/// Index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexSummary {
    pub data_dir: String,
    pub language: String,
    pub lemmas: usize,
    pub synsets: usize,
    pub lemma_index_bytes: u64,
    pub offset_index_bytes: u64,
}

impl HumanFormat for IndexSummary {
    fn format_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Index Statistics:");
        let _ = writeln!(out, "════════════════");
        let _ = writeln!(out, "Data directory: {}", self.data_dir);
        let _ = writeln!(out, "Language: {}", self.language);
        let _ = writeln!(out, "Lemmas: {}", self.lemmas);
        let _ = writeln!(out, "Synsets: {}", self.synsets);
        let _ = writeln!(
            out,
            "Lemma index size: {}",
            format_bytes(self.lemma_index_bytes)
        );
        let _ = writeln!(
            out,
            "Offset index size: {}",
            format_bytes(self.offset_index_bytes)
        );
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(result: &T, args: &WordNetArgs) -> Result<()>
where
    T: Serialize + HumanFormat,
{
    print!("{}", render(result, args)?);
    Ok(())
}

/// Render a result in the specified format.
pub fn render<T>(result: &T, args: &WordNetArgs) -> Result<String>
where
    T: Serialize + HumanFormat,
{
    match args.output_format {
        OutputFormat::Human => Ok(result.format_human()),
        OutputFormat::Json => {
            let mut json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            json.push('\n');
            Ok(json)
        }
    }
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
