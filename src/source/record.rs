//! Parsing of stored rows.
//!
//! Synset table rows look like
//! `id, <unused>, "lemma1,lemma2", "gloss;example1/example2", ..., POS`.

use csv::StringRecord;

use crate::error::{Result, WordNetError};
use crate::synset::{PartOfSpeech, Synset, SynsetId};

const MIN_SYNSET_COLUMNS: usize = 5;

/// Parse a trimmed numeric id from `field`.
pub fn parse_id(field: Option<&str>, what: &str) -> Result<SynsetId> {
    let field = field
        .ok_or_else(|| WordNetError::parse(format!("missing {what} column")))?
        .trim();
    field
        .parse::<SynsetId>()
        .map_err(|e| WordNetError::parse(format!("{what} '{field}': {e}")))
}

/// Whether every field of the row is blank.
pub fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Split the combined gloss column into gloss and examples.
///
/// Examples follow the first `;`, are separated by `/`, and may carry
/// stray backslash escapes at either end. Later `;` characters stay inside
/// the example text.
pub fn split_gloss(raw: &str) -> (String, Vec<String>) {
    match raw.split_once(';') {
        Some((gloss, examples)) => {
            let examples = examples
                .trim()
                .trim_matches('\\')
                .split('/')
                .map(|example| example.trim().trim_matches('"').trim())
                .filter(|example| !example.is_empty())
                .map(str::to_string)
                .collect();
            (gloss.trim().to_string(), examples)
        }
        None => (raw.trim().to_string(), Vec::new()),
    }
}

/// Build a [`Synset`] from one row of the synset table.
pub fn parse_synset_record(record: &StringRecord) -> Result<Synset> {
    if record.len() < MIN_SYNSET_COLUMNS {
        return Err(WordNetError::parse(format!(
            "synset row has {} columns, expected at least {MIN_SYNSET_COLUMNS}",
            record.len()
        )));
    }

    let id = parse_id(record.get(0), "synset id")?;

    let lemma_names: Vec<String> = record
        .get(2)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|lemma| !lemma.is_empty())
        .map(str::to_string)
        .collect();
    let head_word = lemma_names
        .first()
        .cloned()
        .ok_or_else(|| WordNetError::parse(format!("synset {id} has no lemmas")))?;

    let (gloss, examples) = split_gloss(record.get(3).unwrap_or_default());

    let pos = record
        .get(record.len() - 1)
        .unwrap_or_default()
        .parse::<PartOfSpeech>()
        .map_err(|e| WordNetError::parse(format!("synset {id}: {e}")))?;

    Ok(Synset::new(id, pos, head_word, lemma_names, gloss, examples))
}
