//! The weighted graph walker.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};
use crate::graph::{CoPurchaseGraph, ItemName};

use super::types::{WalkMode, WalkOutcome, WalkParams};

/// Performs repeated weighted hops over a co-purchase graph.
///
/// The walker owns its random source, so one instance per session keeps
/// concurrent requests independent. Greedy walks ignore the RNG entirely
/// and are fully deterministic for a given graph and start node.
///
/// # Example
///
/// ```
/// use basket_graph_core::graph::CoPurchaseGraph;
/// use basket_graph_core::walk::{GraphWalker, WalkParams};
///
/// let mut graph = CoPurchaseGraph::new();
/// graph.add_edge("A", "B", 5.0).unwrap();
/// graph.add_edge("A", "C", 1.0).unwrap();
///
/// let mut walker = GraphWalker::new();
/// let outcome = walker.walk(&graph, "A", &WalkParams::with_hops(1)).unwrap();
/// assert_eq!(outcome.items, vec!["B"]);
/// ```
#[derive(Debug)]
pub struct GraphWalker {
    rng: StdRng,
}

impl Default for GraphWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphWalker {
    /// Create a walker seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Set the seed for reproducible weighted-random walks (testing).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Walk `params.hops` hops from `start`, collecting the hopped-to
    /// items.
    ///
    /// Per hop:
    /// 1. Enumerate candidates within `params.cutoff` graph distance of
    ///    the current node (the current node itself is excluded).
    /// 2. Pair each candidate with the weight of its direct edge to the
    ///    current node.
    /// 3. Choose a candidate per `params.mode`, skipping items already
    ///    visited this walk; after `params.max_retries` attempts the
    ///    current candidate is accepted even if visited, and
    ///    `revisits` is incremented.
    /// 4. The chosen item is appended and becomes the new current node.
    ///
    /// A dead end (no candidates) on the first hop is an error; a dead end
    /// later truncates the walk and returns what was collected, with
    /// `truncated` set.
    ///
    /// # Errors
    ///
    /// * `CoreError::UnknownNode` - `start` is not in the graph
    /// * `CoreError::NoNeighbours` - `start` has no candidates within the
    ///   cutoff
    /// * `CoreError::MissingEdge` - a candidate beyond distance 1 has no
    ///   direct edge to the current node (only with `cutoff > 1`)
    #[tracing::instrument(skip(self, graph), fields(hops = params.hops, cutoff = params.cutoff, mode = ?params.mode))]
    pub fn walk(
        &mut self,
        graph: &CoPurchaseGraph,
        start: &str,
        params: &WalkParams,
    ) -> CoreResult<WalkOutcome> {
        if !graph.contains(start) {
            return Err(CoreError::UnknownNode {
                item: start.to_string(),
            });
        }

        let mut outcome = WalkOutcome::new(start);
        if params.hops == 0 {
            return Ok(outcome);
        }

        let mut visited: Vec<ItemName> = vec![start.to_string()];
        let mut current: ItemName = start.to_string();

        for hop in 0..params.hops {
            let candidates = graph.neighbourhood_within(&current, params.cutoff)?;
            if candidates.is_empty() {
                if hop == 0 {
                    return Err(CoreError::NoNeighbours { item: current });
                }
                debug!(hop, node = %current, "dead end, truncating walk");
                outcome.truncated = true;
                break;
            }

            let mut weighted: Vec<(ItemName, f32)> = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let weight = graph.edge_weight(&current, &candidate).ok_or_else(|| {
                    CoreError::MissingEdge {
                        from: current.clone(),
                        to: candidate.clone(),
                    }
                })?;
                weighted.push((candidate, weight));
            }

            let (next, revisit) = match params.mode {
                WalkMode::Greedy => Self::pick_greedy(&mut weighted, &visited, params.max_retries),
                WalkMode::WeightedRandom => {
                    self.pick_weighted_random(&weighted, &visited, params.max_retries)
                }
            };

            if revisit {
                outcome.revisits += 1;
            }
            trace!(hop, next = %next, revisit, "hop selected");

            visited.push(next.clone());
            outcome.items.push(next.clone());
            current = next;
        }

        debug!(
            items = outcome.items.len(),
            truncated = outcome.truncated,
            revisits = outcome.revisits,
            "walk complete"
        );
        Ok(outcome)
    }

    /// Greedy selection: rank by weight descending (name ascending on
    /// ties) and take the first unvisited candidate within the retry
    /// budget. Falls back to the top-ranked candidate when the budget is
    /// spent or every candidate was visited.
    ///
    /// `weighted` must be non-empty.
    fn pick_greedy(
        weighted: &mut [(ItemName, f32)],
        visited: &[ItemName],
        max_retries: usize,
    ) -> (ItemName, bool) {
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        for (attempt, (name, _)) in weighted.iter().enumerate() {
            if attempt > max_retries {
                break;
            }
            if !visited.contains(name) {
                return (name.clone(), false);
            }
        }

        (weighted[0].0.clone(), true)
    }

    /// Weighted-random selection: sample from the normalized weight
    /// distribution, resampling visited candidates up to the retry
    /// budget, then accepting whatever was last drawn.
    ///
    /// `weighted` must be non-empty.
    fn pick_weighted_random(
        &mut self,
        weighted: &[(ItemName, f32)],
        visited: &[ItemName],
        max_retries: usize,
    ) -> (ItemName, bool) {
        let total: f32 = weighted.iter().map(|(_, weight)| weight).sum();

        let mut choice = self.sample_one(weighted, total);
        for _ in 0..max_retries {
            if !visited.contains(choice) {
                return (choice.clone(), false);
            }
            choice = self.sample_one(weighted, total);
        }

        let revisit = visited.contains(choice);
        (choice.clone(), revisit)
    }

    /// Draw one candidate by cumulative-probability inversion.
    fn sample_one<'a>(&mut self, weighted: &'a [(ItemName, f32)], total: f32) -> &'a ItemName {
        let threshold: f32 = self.rng.gen::<f32>() * total;
        let mut cumulative = 0.0f32;
        for (name, weight) in weighted {
            cumulative += weight;
            if threshold < cumulative {
                return name;
            }
        }
        // Accumulated rounding can leave threshold at or past the final
        // cumulative sum; the last candidate is the right bucket then.
        &weighted[weighted.len() - 1].0
    }
}
