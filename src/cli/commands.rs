//! Command implementations for the indowordnet CLI.

use log::{debug, info};
use serde::Serialize;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::WordNetConfig;
use crate::error::{Result, WordNetError};
use crate::index::LexicalIndex;
use crate::relation::RelationKind;
use crate::storage::{FileStorage, Storage};
use crate::wordnet::WordNet;

/// Execute a CLI command.
pub fn execute_command(args: WordNetArgs) -> Result<()> {
    let config = load_config(&args)?;
    debug!("using configuration {config:?}");

    match &args.command {
        Command::BuildIndex => output_result(&build_index(&config)?, &args),
        Command::Synsets(synsets_args) => {
            let wordnet = WordNet::open(config)?;
            output_result(&lookup_synsets(&wordnet, synsets_args)?, &args)
        }
        Command::Synset(synset_args) => {
            let wordnet = WordNet::open(config)?;
            let synset = wordnet.synset(&synset_args.key)?;
            output_result(&SynsetView::from(&synset), &args)
        }
        Command::Relation(relation_args) => {
            let wordnet = WordNet::open(config)?;
            output_result(&follow_relation(&wordnet, relation_args)?, &args)
        }
        Command::Similarity(similarity_args) => {
            let wordnet = WordNet::open(config)?;
            output_result(&score_similarity(&wordnet, similarity_args)?, &args)
        }
        Command::Stats => output_result(&show_stats(&config)?, &args),
    }
}

/// Resolve the configuration from `--config`, then apply `--data-dir` and
/// `--language` on top.
pub fn load_config(args: &WordNetArgs) -> Result<WordNetConfig> {
    let mut config = match &args.config {
        Some(path) => WordNetConfig::from_file(path)?,
        None => WordNetConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(language) = &args.language {
        config = config.with_language(language.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Build the index files.
pub fn build_index(config: &WordNetConfig) -> Result<IndexBuildResult> {
    info!("building index under {}", config.data_dir.display());
    let stats = WordNet::build_index(config)?;
    Ok(IndexBuildResult {
        data_dir: config.data_dir.display().to_string(),
        stats,
    })
}

/// List the synsets of a lemma.
pub fn lookup_synsets(wordnet: &WordNet, args: &SynsetsArgs) -> Result<SynsetList> {
    let synsets = wordnet.synsets_with_pos(&args.lemma, args.pos.map(Into::into))?;
    Ok(SynsetList {
        lemma: args.lemma.clone(),
        synsets: synsets.iter().map(SynsetView::from).collect(),
    })
}

/// Either direct relation targets or hypernym generations.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RelationOutput {
    Targets(RelationResult),
    Levels(HypernymLevels),
}

impl HumanFormat for RelationOutput {
    fn format_human(&self) -> String {
        match self {
            RelationOutput::Targets(result) => result.format_human(),
            RelationOutput::Levels(levels) => levels.format_human(),
        }
    }
}

/// Follow a relation from a synset.
pub fn follow_relation(wordnet: &WordNet, args: &RelationArgs) -> Result<RelationOutput> {
    let kind = RelationKind::from(args.relation);
    let synset = wordnet.synset(&args.key)?;

    if let Some(level) = args.level {
        if kind != RelationKind::Hypernymy {
            return Err(WordNetError::invalid_argument(format!(
                "--level only applies to hypernymy, not {kind}"
            )));
        }
        if args.subcategory.is_some() {
            return Err(WordNetError::invalid_argument(
                "--subcategory cannot be combined with --level",
            ));
        }
        let levels = wordnet.hypernymy_levels(&synset, level)?;
        return Ok(RelationOutput::Levels(HypernymLevels {
            synset: synset.to_string(),
            levels: levels
                .iter()
                .map(|generation| generation.iter().map(ToString::to_string).collect())
                .collect(),
        }));
    }

    let targets = wordnet.relations(&synset, kind, args.subcategory.as_deref())?;
    Ok(RelationOutput::Targets(RelationResult {
        synset: synset.to_string(),
        relation: kind.to_string(),
        subcategory: args.subcategory.clone(),
        targets: targets.iter().map(SynsetView::from).collect(),
    }))
}

/// Score two synsets.
///
/// With a single measure its failure is the command's failure. With
/// `--measure all` each failure is reported next to its measure.
pub fn score_similarity(wordnet: &WordNet, args: &SimilarityArgs) -> Result<SimilarityResult> {
    let first = wordnet.synset(&args.first)?;
    let second = wordnet.synset(&args.second)?;
    let comparison = wordnet.compare(&first, &second)?;

    let single = args.measure != MeasureArg::All;
    let mut scores = Vec::new();
    for measure in args.measure.measures() {
        match comparison.measure(measure) {
            Ok(value) => scores.push(Score {
                measure: measure.to_string(),
                value: Some(value),
                error: None,
            }),
            Err(e) if single => return Err(e),
            Err(e) => scores.push(Score {
                measure: measure.to_string(),
                value: None,
                error: Some(e.to_string()),
            }),
        }
    }

    let subsumer = comparison.subsumer();
    Ok(SimilarityResult {
        first: first.to_string(),
        second: second.to_string(),
        lcs: subsumer.id,
        distance_sum: subsumer.distance_sum,
        scores,
    })
}

/// Summarize the persisted index.
pub fn show_stats(config: &WordNetConfig) -> Result<IndexSummary> {
    let storage = FileStorage::new(&config.data_dir, config.storage.clone())?;
    let index = LexicalIndex::read_from_storage(&storage, config)?;
    Ok(IndexSummary {
        data_dir: config.data_dir.display().to_string(),
        language: config.language.clone(),
        lemmas: index.lemma_count(),
        synsets: index.synset_count(),
        lemma_index_bytes: storage.file_size(&config.lemma_index_file)?,
        offset_index_bytes: storage.file_size(&config.offset_index_file)?,
    })
}
