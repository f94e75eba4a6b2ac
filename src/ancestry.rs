//! Ancestor-distance walk over the hypernym taxonomy.
//!
//! Starting from one synset at distance 1, the walk follows hypernym edges
//! and records, for every reachable synset, the fewest hops needed to reach
//! it (plus one). Distances are only ever lowered. A synset is re-queued
//! whenever its distance improves, so the final mapping holds true minima
//! regardless of visiting order and the walk terminates even on cyclic data.
//!
//! The frontier is a stack. Parents are recorded in edge order when their
//! child is expanded and the most recently pushed synset is expanded next,
//! so discovery order is depth-first. Ties between common subsumers are
//! broken by that order.
//!
//! The VERB taxonomy is a forest. There, a synthetic root is seeded at +∞
//! and every visited synset without hypernyms offers `distance + 1` to it,
//! so the root sits one hop above the nearest top-level verb.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use crate::config::TaxonomyRoots;
use crate::error::{Result, WordNetError};
use crate::synset::{PartOfSpeech, Synset, SynsetId};

/// Hop count from the start synset; the start itself is 1.
pub type Distance = u32;

/// Source of direct hypernyms for the walk.
pub trait HypernymGraph {
    fn hypernyms(&self, synset: &Synset) -> Result<Vec<Synset>>;
}

/// Shape of the taxonomy a walk runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    /// One stored root that every chain ends at.
    Rooted { root: SynsetId },
    /// Disconnected trees joined under a sentinel id that is never stored.
    Forest { synthetic_root: SynsetId },
}

impl Taxonomy {
    /// Taxonomy used for `pos`. Only NOUN and VERB have one.
    pub fn for_pos(pos: PartOfSpeech, roots: &TaxonomyRoots) -> Option<Taxonomy> {
        match pos {
            PartOfSpeech::Noun => Some(Taxonomy::Rooted {
                root: roots.noun_root,
            }),
            PartOfSpeech::Verb => Some(Taxonomy::Forest {
                synthetic_root: roots.verb_synthetic_root,
            }),
            PartOfSpeech::Adjective | PartOfSpeech::Adverb => None,
        }
    }

    pub fn root(&self) -> SynsetId {
        match self {
            Taxonomy::Rooted { root } => *root,
            Taxonomy::Forest { synthetic_root } => *synthetic_root,
        }
    }
}

/// Shortest hypernym distances from one start synset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorDistances {
    start: SynsetId,
    distances: AHashMap<SynsetId, Distance>,
    /// Ids in the order they were first recorded.
    order: Vec<SynsetId>,
    recorded: AHashSet<SynsetId>,
}

impl AncestorDistances {
    fn new(start: SynsetId) -> Self {
        let mut distances = AHashMap::new();
        distances.insert(start, 1);
        AncestorDistances {
            start,
            distances,
            order: vec![start],
            recorded: AHashSet::from_iter([start]),
        }
    }

    fn record(&mut self, id: SynsetId) {
        if self.recorded.insert(id) {
            self.order.push(id);
        }
    }

    /// Reserve a slot in discovery order for an id whose distance is not
    /// known yet.
    fn reserve(&mut self, id: SynsetId) {
        self.record(id);
    }

    /// Min-merge `candidate` into `id`. Returns whether the entry changed.
    fn offer(&mut self, id: SynsetId, candidate: Distance) -> bool {
        match self.distances.get_mut(&id) {
            Some(existing) if *existing <= candidate => false,
            Some(existing) => {
                *existing = candidate;
                true
            }
            None => {
                self.distances.insert(id, candidate);
                self.record(id);
                true
            }
        }
    }

    pub fn start(&self) -> SynsetId {
        self.start
    }

    /// Distance of `id`, or `None` if it was never reached.
    pub fn get(&self, id: SynsetId) -> Option<Distance> {
        self.distances.get(&id).copied()
    }

    pub fn contains(&self, id: SynsetId) -> bool {
        self.distances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reached ids and their distances, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (SynsetId, Distance)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.distances.get(id).map(|distance| (*id, *distance)))
    }
}

/// Walk the hypernyms of `start` and return the distance of every ancestor.
pub fn ancestor_distances<G>(
    graph: &G,
    start: &Synset,
    taxonomy: Taxonomy,
) -> Result<AncestorDistances>
where
    G: HypernymGraph + ?Sized,
{
    let mut distances = AncestorDistances::new(start.id());
    let synthetic_root = match taxonomy {
        Taxonomy::Forest { synthetic_root } => {
            if synthetic_root == start.id() {
                return Err(WordNetError::invalid_argument(format!(
                    "synthetic root id {synthetic_root} collides with synset {start}"
                )));
            }
            distances.reserve(synthetic_root);
            Some(synthetic_root)
        }
        Taxonomy::Rooted { .. } => None,
    };

    let mut frontier = vec![start.clone()];
    // Distance each synset had when it was last expanded.
    let mut expanded: AHashMap<SynsetId, Distance> = AHashMap::new();
    let mut expansions = 0usize;

    while let Some(current) = frontier.pop() {
        let Some(distance) = distances.get(current.id()) else {
            continue;
        };
        if expanded.get(&current.id()) == Some(&distance) {
            continue;
        }
        expanded.insert(current.id(), distance);
        let next = distance.saturating_add(1);
        let parents = graph.hypernyms(&current)?;
        expansions += 1;

        if parents.is_empty() {
            if let Some(root) = synthetic_root {
                distances.offer(root, next);
            }
            continue;
        }

        for parent in parents {
            if Some(parent.id()) == synthetic_root {
                continue;
            }
            let improved = distances.offer(parent.id(), next);
            // A pending parent is pushed again so it is expanded from the top.
            if improved || !expanded.contains_key(&parent.id()) {
                trace!("{} -> {} at distance {next}", current, parent);
                frontier.push(parent);
            }
        }
    }

    debug!(
        "ancestor walk from {start}: {} ancestors, {expansions} expansions",
        distances.len()
    );
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Hypernym edges held in memory.
    struct TestGraph {
        pos: PartOfSpeech,
        edges: HashMap<SynsetId, Vec<SynsetId>>,
        calls: Cell<usize>,
    }

    impl TestGraph {
        fn new(pos: PartOfSpeech, edges: &[(SynsetId, &[SynsetId])]) -> Self {
            TestGraph {
                pos,
                edges: edges.iter().map(|(id, up)| (*id, up.to_vec())).collect(),
                calls: Cell::new(0),
            }
        }

        fn synset(&self, id: SynsetId) -> Synset {
            Synset::new(id, self.pos, format!("s{id}"), vec![format!("s{id}")], "", vec![])
        }
    }

    impl HypernymGraph for TestGraph {
        fn hypernyms(&self, synset: &Synset) -> Result<Vec<Synset>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self
                .edges
                .get(&synset.id())
                .map(|ids| ids.iter().map(|id| self.synset(*id)).collect())
                .unwrap_or_default())
        }
    }

    const NOUNS: Taxonomy = Taxonomy::Rooted { root: 73 };
    const VERBS: Taxonomy = Taxonomy::Forest { synthetic_root: 0 };

    #[test]
    fn test_start_is_distance_one() {
        let graph = TestGraph::new(PartOfSpeech::Noun, &[(200, &[100]), (100, &[73])]);
        let distances = ancestor_distances(&graph, &graph.synset(200), NOUNS).unwrap();

        assert_eq!(distances.start(), 200);
        assert_eq!(distances.get(200), Some(1));
        assert_eq!(distances.get(100), Some(2));
        assert_eq!(distances.get(73), Some(3));
        for (id, distance) in distances.iter() {
            if id != 200 {
                assert!(distance >= 2);
            }
        }
    }

    #[test]
    fn test_minimum_is_kept_over_multiple_paths() {
        // 600 reaches 100 directly and through 200.
        let graph = TestGraph::new(
            PartOfSpeech::Noun,
            &[(600, &[200, 100]), (200, &[100]), (100, &[73])],
        );
        let distances = ancestor_distances(&graph, &graph.synset(600), NOUNS).unwrap();

        assert_eq!(distances.get(100), Some(2));
        assert_eq!(distances.get(73), Some(3));
        assert_eq!(distances.len(), 4);
    }

    #[test]
    fn test_improved_distance_propagates_upwards() {
        // 2 is expanded first, so 3 is reached via the long chain 2 -> 4 -> 3
        // before 5 offers the shorter route.
        let graph = TestGraph::new(
            PartOfSpeech::Noun,
            &[(1, &[5, 2]), (2, &[4]), (4, &[3]), (5, &[3]), (3, &[73])],
        );
        let distances = ancestor_distances(&graph, &graph.synset(1), NOUNS).unwrap();

        assert_eq!(distances.get(3), Some(3));
        assert_eq!(distances.get(73), Some(4));
        assert_eq!(distances.get(4), Some(3));
    }

    #[test]
    fn test_discovery_order_is_depth_first() {
        // Siblings are recorded together, then the last one is walked up
        // before the first.
        let graph = TestGraph::new(
            PartOfSpeech::Noun,
            &[(1, &[5, 4]), (5, &[73]), (4, &[6]), (6, &[73])],
        );
        let distances = ancestor_distances(&graph, &graph.synset(1), NOUNS).unwrap();

        let order: Vec<SynsetId> = distances.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![1, 5, 4, 6, 73]);
        assert_eq!(distances.get(73), Some(3));
    }

    #[test]
    fn test_each_synset_expanded_once_without_improvement() {
        // Diamond: 2 and 3 both lead to 4, at the same distance.
        let graph = TestGraph::new(
            PartOfSpeech::Noun,
            &[(1, &[2, 3]), (2, &[4]), (3, &[4]), (4, &[73])],
        );
        let distances = ancestor_distances(&graph, &graph.synset(1), NOUNS).unwrap();

        assert_eq!(distances.get(4), Some(3));
        assert_eq!(distances.get(73), Some(4));
        // 1, 2, 3, 4 and 73 are each expanded exactly once.
        assert_eq!(graph.calls.get(), 5);
    }

    #[test]
    fn test_forest_synthetic_root() {
        let graph = TestGraph::new(PartOfSpeech::Verb, &[(1001, &[1000])]);
        let distances = ancestor_distances(&graph, &graph.synset(1001), VERBS).unwrap();

        assert_eq!(distances.get(1000), Some(2));
        assert_eq!(distances.get(0), Some(3));

        // Synthetic root is recorded right after the start.
        let order: Vec<SynsetId> = distances.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![1001, 0, 1000]);
    }

    #[test]
    fn test_forest_root_takes_nearest_top_level_verb() {
        // 1 -> 2 (top level) and 1 -> 3 -> 4 (top level).
        let graph = TestGraph::new(PartOfSpeech::Verb, &[(1, &[3, 2]), (3, &[4])]);
        let distances = ancestor_distances(&graph, &graph.synset(1), VERBS).unwrap();

        assert_eq!(distances.get(0), Some(3));
        assert_eq!(distances.get(4), Some(3));
    }

    #[test]
    fn test_forest_start_without_hypernyms() {
        let graph = TestGraph::new(PartOfSpeech::Verb, &[]);
        let distances = ancestor_distances(&graph, &graph.synset(2000), VERBS).unwrap();

        assert_eq!(distances.get(2000), Some(1));
        assert_eq!(distances.get(0), Some(2));
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = TestGraph::new(PartOfSpeech::Verb, &[(1, &[2]), (2, &[1])]);
        let distances = ancestor_distances(&graph, &graph.synset(1), VERBS).unwrap();

        assert_eq!(distances.get(1), Some(1));
        assert_eq!(distances.get(2), Some(2));
        // No top-level synset was seen, so the synthetic root stays unreached.
        assert_eq!(distances.get(0), None);
        assert!(graph.calls.get() <= 3);
    }

    #[test]
    fn test_synthetic_root_collision_is_rejected() {
        let graph = TestGraph::new(PartOfSpeech::Verb, &[]);
        let result = ancestor_distances(&graph, &graph.synset(0), VERBS);
        assert!(matches!(result, Err(WordNetError::InvalidArgument(_))));
    }

    #[test]
    fn test_taxonomy_for_pos() {
        let roots = TaxonomyRoots::default();
        assert_eq!(
            Taxonomy::for_pos(PartOfSpeech::Noun, &roots),
            Some(Taxonomy::Rooted { root: 73 })
        );
        assert_eq!(
            Taxonomy::for_pos(PartOfSpeech::Verb, &roots).map(|t| t.root()),
            Some(0)
        );
        assert_eq!(Taxonomy::for_pos(PartOfSpeech::Adjective, &roots), None);
    }
}
