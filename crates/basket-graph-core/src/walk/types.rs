//! Walk parameter and result types.

use serde::{Deserialize, Serialize};

use crate::graph::ItemName;

/// How the next hop is chosen from the weighted candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkMode {
    /// Deterministic: candidates ranked by weight descending (name
    /// ascending on ties), first unvisited candidate wins.
    #[default]
    Greedy,
    /// Stochastic: candidate weights normalized to a distribution and one
    /// candidate sampled from it.
    WeightedRandom,
}

/// Parameters for a single walk.
#[derive(Debug, Clone)]
pub struct WalkParams {
    /// Number of hops to take; the returned item list has exactly this
    /// length unless the walk dead-ends early.
    pub hops: usize,

    /// Maximum graph distance for hop candidates (default: 1).
    ///
    /// Values above 1 enumerate a wider neighbourhood, but candidates
    /// without a direct edge to the current node fail the weight lookup
    /// (`CoreError::MissingEdge`), so anything but 1 is only useful on
    /// graphs dense enough that the whole neighbourhood stays adjacent.
    pub cutoff: usize,

    /// Hop selection mode.
    pub mode: WalkMode,

    /// Attempts at an unvisited candidate before a revisit is accepted
    /// (default: 20). Bounded so a walk on a tiny or tightly-knit graph
    /// terminates instead of resampling forever.
    pub max_retries: usize,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            hops: 5,
            cutoff: 1,
            mode: WalkMode::Greedy,
            max_retries: 20,
        }
    }
}

impl WalkParams {
    /// Create params for a given hop count.
    #[must_use]
    pub fn with_hops(hops: usize) -> Self {
        Self {
            hops,
            ..Default::default()
        }
    }

    /// Builder: set the selection mode.
    #[must_use]
    pub fn mode(mut self, mode: WalkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set the candidate cutoff distance.
    #[must_use]
    pub fn cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Builder: set the revisit retry budget.
    #[must_use]
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Result of one walk.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// Hopped-to items in hop order. The start node is not included;
    /// callers prepend it if their display wants it.
    pub items: Vec<ItemName>,

    /// The node the walk started from.
    pub start: ItemName,

    /// Whether the walk stopped early on a dead end (a current node with
    /// no candidates within the cutoff).
    pub truncated: bool,

    /// How many hops fell back to an already-visited item after the retry
    /// budget ran out.
    pub revisits: usize,
}

impl WalkOutcome {
    pub(crate) fn new(start: impl Into<ItemName>) -> Self {
        Self {
            items: Vec::new(),
            start: start.into(),
            truncated: false,
            revisits: 0,
        }
    }

    /// Number of completed hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no hop completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
