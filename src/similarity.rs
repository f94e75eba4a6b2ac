//! Path, Leacock-Chodorow and Wu-Palmer similarity.
//!
//! All three measures share one step: walk the hypernyms of both synsets
//! with [`ancestor_distances`], then pick the common ancestor with the
//! smallest summed distance. That ancestor is the lowest common subsumer
//! (LCS). Depths are measured to the taxonomy root, which is the stored
//! NOUN root or the synthetic VERB root.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ancestry::{AncestorDistances, Distance, HypernymGraph, Taxonomy, ancestor_distances};
use crate::config::TaxonomyRoots;
use crate::error::{Result, WordNetError};
use crate::synset::{Synset, SynsetId};

/// Similarity measure selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    Path,
    LeacockChodorow,
    WuPalmer,
}

impl SimilarityMeasure {
    pub const ALL: [SimilarityMeasure; 3] = [
        SimilarityMeasure::Path,
        SimilarityMeasure::LeacockChodorow,
        SimilarityMeasure::WuPalmer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMeasure::Path => "path",
            SimilarityMeasure::LeacockChodorow => "lch",
            SimilarityMeasure::WuPalmer => "wup",
        }
    }
}

impl fmt::Display for SimilarityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMeasure {
    type Err = WordNetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "path" => Ok(SimilarityMeasure::Path),
            "lch" | "leacock-chodorow" => Ok(SimilarityMeasure::LeacockChodorow),
            "wup" | "wu-palmer" => Ok(SimilarityMeasure::WuPalmer),
            other => Err(WordNetError::parse(format!(
                "unknown similarity measure '{other}'"
            ))),
        }
    }
}

/// The lowest common subsumer of two synsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subsumer {
    pub id: SynsetId,
    /// `dist1[id] + dist2[id]`.
    pub distance_sum: Distance,
}

/// Result of the shared walk over a pair of synsets.
#[derive(Debug, Clone)]
pub struct Comparison {
    first: AncestorDistances,
    second: AncestorDistances,
    subsumer: Subsumer,
    root: SynsetId,
    first_root_depth: Distance,
    second_root_depth: Distance,
}

impl Comparison {
    pub fn subsumer(&self) -> Subsumer {
        self.subsumer
    }

    pub fn root(&self) -> SynsetId {
        self.root
    }

    /// Distances to the root from the first and second synset.
    pub fn root_depths(&self) -> (Distance, Distance) {
        (self.first_root_depth, self.second_root_depth)
    }

    pub fn first(&self) -> &AncestorDistances {
        &self.first
    }

    pub fn second(&self) -> &AncestorDistances {
        &self.second
    }

    fn is_degenerate(&self) -> bool {
        self.first.start() == self.second.start() || self.subsumer.distance_sum <= 1
    }

    fn check_not_degenerate(&self, measure: SimilarityMeasure) -> Result<()> {
        if self.is_degenerate() {
            return Err(WordNetError::degenerate_input(format!(
                "{measure} similarity of synset {} with itself",
                self.first.start()
            )));
        }
        Ok(())
    }

    /// `1 / (min_dist - 1)`.
    pub fn path(&self) -> Result<f64> {
        self.check_not_degenerate(SimilarityMeasure::Path)?;
        Ok(1.0 / f64::from(self.subsumer.distance_sum - 1))
    }

    /// `-log10((min_dist - 1) / (2 * max(root depths)))`.
    pub fn lch(&self) -> Result<f64> {
        self.check_not_degenerate(SimilarityMeasure::LeacockChodorow)?;
        let depth = self.first_root_depth.max(self.second_root_depth);
        let ratio = f64::from(self.subsumer.distance_sum - 1) / (2.0 * f64::from(depth));
        Ok(-ratio.log10())
    }

    /// `2 * (dist1[root] - dist1[lcs]) / (dist1[root] + dist2[root])`.
    pub fn wup(&self) -> Result<f64> {
        let lcs_depth = self.first.get(self.subsumer.id).ok_or_else(|| {
            WordNetError::no_common_ancestor(format!(
                "subsumer {} missing from the walk of {}",
                self.subsumer.id,
                self.first.start()
            ))
        })?;
        let numerator = 2.0 * (f64::from(self.first_root_depth) - f64::from(lcs_depth));
        let denominator = f64::from(self.first_root_depth) + f64::from(self.second_root_depth);
        Ok(numerator / denominator)
    }

    pub fn measure(&self, measure: SimilarityMeasure) -> Result<f64> {
        match measure {
            SimilarityMeasure::Path => self.path(),
            SimilarityMeasure::LeacockChodorow => self.lch(),
            SimilarityMeasure::WuPalmer => self.wup(),
        }
    }
}

/// Computes similarity over any [`HypernymGraph`].
#[derive(Debug)]
pub struct SimilarityEngine<'a, G: HypernymGraph + ?Sized> {
    graph: &'a G,
    roots: TaxonomyRoots,
}

impl<'a, G: HypernymGraph + ?Sized> SimilarityEngine<'a, G> {
    pub fn new(graph: &'a G, roots: TaxonomyRoots) -> Self {
        SimilarityEngine { graph, roots }
    }

    fn taxonomy(&self, first: &Synset, second: &Synset) -> Result<Taxonomy> {
        if first.pos() != second.pos() {
            return Err(WordNetError::unsupported_pair(format!(
                "{first} and {second} have different parts of speech"
            )));
        }
        Taxonomy::for_pos(first.pos(), &self.roots).ok_or_else(|| {
            WordNetError::unsupported_pair(format!(
                "similarity is not defined for {} synsets",
                first.pos()
            ))
        })
    }

    /// Walk both synsets and locate their lowest common subsumer.
    pub fn compare(&self, first: &Synset, second: &Synset) -> Result<Comparison> {
        let taxonomy = self.taxonomy(first, second)?;
        let dist1 = ancestor_distances(self.graph, first, taxonomy)?;
        let dist2 = ancestor_distances(self.graph, second, taxonomy)?;

        let mut best: Option<Subsumer> = None;
        for (id, d1) in dist1.iter() {
            let Some(d2) = dist2.get(id) else {
                continue;
            };
            let distance_sum = d1.saturating_add(d2);
            if best.is_none_or(|b| distance_sum < b.distance_sum) {
                best = Some(Subsumer { id, distance_sum });
            }
        }
        let subsumer = best.ok_or_else(|| {
            WordNetError::no_common_ancestor(format!("{first} and {second} share no ancestor"))
        })?;

        let root = taxonomy.root();
        let (Some(first_root_depth), Some(second_root_depth)) = (dist1.get(root), dist2.get(root))
        else {
            return Err(WordNetError::no_common_ancestor(format!(
                "root {root} is not reachable from both {first} and {second}"
            )));
        };

        debug!(
            "{first} ~ {second}: lcs {} at {}, root depths {first_root_depth}/{second_root_depth}",
            subsumer.id, subsumer.distance_sum
        );

        Ok(Comparison {
            first: dist1,
            second: dist2,
            subsumer,
            root,
            first_root_depth,
            second_root_depth,
        })
    }

    pub fn common_subsumer(&self, first: &Synset, second: &Synset) -> Result<Subsumer> {
        Ok(self.compare(first, second)?.subsumer())
    }

    pub fn path(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.compare(first, second)?.path()
    }

    pub fn lch(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.compare(first, second)?.lch()
    }

    pub fn wup(&self, first: &Synset, second: &Synset) -> Result<f64> {
        self.compare(first, second)?.wup()
    }

    pub fn measure(&self, measure: SimilarityMeasure, first: &Synset, second: &Synset) -> Result<f64> {
        self.compare(first, second)?.measure(measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synset::PartOfSpeech;
    use std::collections::HashMap;

    struct Taxonomies {
        edges: HashMap<SynsetId, Vec<SynsetId>>,
        pos: HashMap<SynsetId, PartOfSpeech>,
    }

    impl Taxonomies {
        fn new() -> Self {
            use PartOfSpeech::*;

            let edges = [
                (100, vec![73]),
                (200, vec![100]),
                (201, vec![200]),
                (400, vec![100]),
                (1001, vec![1000]),
                (1002, vec![1000]),
                (2001, vec![2000]),
                (900, vec![]),
                // Two routes from 1 and 2 that tie at 11 and 12.
                (1, vec![10, 20]),
                (10, vec![11]),
                (20, vec![21]),
                (21, vec![12]),
                (11, vec![73]),
                (12, vec![73]),
                (2, vec![30, 12]),
                (30, vec![11]),
            ];
            let pos = [
                (73, Noun),
                (100, Noun),
                (200, Noun),
                (201, Noun),
                (400, Noun),
                (900, Noun),
                (1, Noun),
                (2, Noun),
                (10, Noun),
                (11, Noun),
                (12, Noun),
                (20, Noun),
                (21, Noun),
                (30, Noun),
                (1000, Verb),
                (1001, Verb),
                (1002, Verb),
                (2000, Verb),
                (2001, Verb),
                (700, Adjective),
                (701, Adjective),
            ];
            Taxonomies {
                edges: edges.into_iter().collect(),
                pos: pos.into_iter().collect(),
            }
        }

        fn synset(&self, id: SynsetId) -> Synset {
            Synset::new(id, self.pos[&id], format!("s{id}"), vec![format!("s{id}")], "", vec![])
        }
    }

    impl HypernymGraph for Taxonomies {
        fn hypernyms(&self, synset: &Synset) -> Result<Vec<Synset>> {
            Ok(self
                .edges
                .get(&synset.id())
                .map(|ids| ids.iter().map(|id| self.synset(*id)).collect())
                .unwrap_or_default())
        }
    }

    fn engine(graph: &Taxonomies) -> SimilarityEngine<'_, Taxonomies> {
        SimilarityEngine::new(graph, TaxonomyRoots::default())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_noun_measures() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(200), graph.synset(201));

        let subsumer = engine.common_subsumer(&a, &b).unwrap();
        assert_eq!(subsumer, Subsumer { id: 200, distance_sum: 3 });

        assert_close(engine.path(&a, &b).unwrap(), 0.5);
        assert_close(engine.lch(&a, &b).unwrap(), 4f64.log10());
        assert_close(engine.wup(&a, &b).unwrap(), 4.0 / 7.0);
    }

    #[test]
    fn test_siblings_share_parent() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(200), graph.synset(400));

        assert_eq!(engine.common_subsumer(&a, &b).unwrap().id, 100);
        assert_close(engine.path(&a, &b).unwrap(), 1.0 / 3.0);
        assert_close(engine.wup(&a, &b).unwrap(), 2.0 / 6.0);
    }

    #[test]
    fn test_tied_subsumers_resolve_in_discovery_order() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(1), graph.synset(2));

        // 11 and 12 both sum to 6. The walk from 1 records 12 first because
        // it climbs through 20 before 10.
        let comparison = engine.compare(&a, &b).unwrap();
        let order: Vec<SynsetId> = comparison.first().iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![1, 10, 20, 21, 12, 73, 11]);
        assert_eq!(comparison.subsumer(), Subsumer { id: 12, distance_sum: 6 });
        assert_eq!(comparison.root_depths(), (4, 3));

        assert_close(comparison.path().unwrap(), 0.2);
        assert_close(comparison.wup().unwrap(), 0.0);
    }

    #[test]
    fn test_path_is_symmetric() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(201), graph.synset(400));

        assert_close(
            engine.path(&a, &b).unwrap(),
            engine.path(&b, &a).unwrap(),
        );
        assert_close(engine.lch(&a, &b).unwrap(), engine.lch(&b, &a).unwrap());
    }

    #[test]
    fn test_disconnected_verbs_meet_at_synthetic_root() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(1001), graph.synset(2001));

        let comparison = engine.compare(&a, &b).unwrap();
        assert_eq!(comparison.subsumer(), Subsumer { id: 0, distance_sum: 6 });
        assert_eq!(comparison.root_depths(), (3, 3));
        assert_close(comparison.path().unwrap(), 0.2);
        assert_close(comparison.wup().unwrap(), 0.0);
        assert_close(comparison.lch().unwrap(), -(5.0f64 / 6.0).log10());
    }

    #[test]
    fn test_verbs_under_one_top_level_synset() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(1001), graph.synset(1002));

        assert_eq!(engine.common_subsumer(&a, &b).unwrap().id, 1000);
        assert_close(engine.path(&a, &b).unwrap(), 1.0 / 3.0);
        assert_close(engine.wup(&a, &b).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn test_identical_synsets() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let a = graph.synset(200);

        assert!(matches!(
            engine.path(&a, &a),
            Err(WordNetError::DegenerateInput(_))
        ));
        assert!(matches!(
            engine.lch(&a, &a),
            Err(WordNetError::DegenerateInput(_))
        ));
        // Wu-Palmer is defined: 2 * (3 - 1) / (3 + 3).
        assert_close(engine.wup(&a, &a).unwrap(), 4.0 / 6.0);
    }

    #[test]
    fn test_unsupported_pairs() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);

        assert!(matches!(
            engine.path(&graph.synset(200), &graph.synset(1001)),
            Err(WordNetError::UnsupportedPair(_))
        ));
        assert!(matches!(
            engine.wup(&graph.synset(700), &graph.synset(701)),
            Err(WordNetError::UnsupportedPair(_))
        ));
    }

    #[test]
    fn test_noun_outside_rooted_taxonomy() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);

        assert!(matches!(
            engine.path(&graph.synset(900), &graph.synset(200)),
            Err(WordNetError::NoCommonAncestor(_))
        ));
    }

    #[test]
    fn test_measure_dispatch_and_parsing() {
        let graph = Taxonomies::new();
        let engine = engine(&graph);
        let (a, b) = (graph.synset(200), graph.synset(201));

        let comparison = engine.compare(&a, &b).unwrap();
        for measure in SimilarityMeasure::ALL {
            assert_close(
                engine.measure(measure, &a, &b).unwrap(),
                comparison.measure(measure).unwrap(),
            );
        }

        assert_eq!(
            "Wu_Palmer".parse::<SimilarityMeasure>().unwrap(),
            SimilarityMeasure::WuPalmer
        );
        assert_eq!(
            "lch".parse::<SimilarityMeasure>().unwrap(),
            SimilarityMeasure::LeacockChodorow
        );
        assert!("cosine".parse::<SimilarityMeasure>().is_err());
    }
}
