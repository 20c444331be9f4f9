//! Recommendation dispatch and shopping-session state.
//!
//! Ties the strategies together: the UI hands over the item the user just
//! picked and the strategy they selected, and gets back a ranked,
//! display-ready list. Session state (the basket and the last-selected
//! item) lives here as an explicit value owned by the calling layer -
//! there is deliberately no process-global "last clicked" tracker, so
//! concurrent sessions cannot interfere.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::embedding::{similar_items, EmbeddingModel};
use crate::error::CoreResult;
use crate::graph::{CoPurchaseGraph, ItemName};
use crate::neighbours::top_neighbours;
use crate::walk::{GraphWalker, WalkParams};

/// Recommendation strategy selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Embedding similarity ([`similar_items`]).
    #[default]
    Similar,
    /// Strongest direct co-purchase edges ([`top_neighbours`]).
    Neighbours,
    /// Weighted graph walk ([`GraphWalker::walk`]).
    Walk,
}

/// Options for one recommendation call.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Strategy to dispatch to.
    pub strategy: Strategy,

    /// Result bound for the similarity and neighbour strategies.
    pub topn: usize,

    /// Hard cap applied after ranking, so the UI never renders an
    /// unmanageable wall of buttons.
    pub max_display: usize,

    /// Walk parameters, used only by [`Strategy::Walk`].
    pub walk: WalkParams,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            topn: 10,
            max_display: 20,
            walk: WalkParams::default(),
        }
    }
}

impl RecommendOptions {
    /// Build options from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            strategy: config.recommend.strategy,
            topn: config.recommend.topn,
            max_display: config.recommend.max_display,
            walk: WalkParams::with_hops(config.walk.hops)
                .cutoff(config.walk.cutoff)
                .max_retries(config.walk.max_retries),
        }
    }

    /// Builder: set the strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder: set the result bound.
    #[must_use]
    pub fn topn(mut self, topn: usize) -> Self {
        self.topn = topn;
        self
    }
}

/// Order items for display: shortest name first (long product names wrap
/// badly on buttons), ties lexicographic, capped at `max_display`.
#[must_use]
pub fn rank_for_display(mut items: Vec<ItemName>, max_display: usize) -> Vec<ItemName> {
    items.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    items.truncate(max_display);
    items
}

/// Dispatches recommendation requests to the configured strategy.
///
/// Borrows the shared read-only graph and embedding model; owns its
/// walker (and therefore its RNG), so each session gets its own
/// `Recommender`.
#[derive(Debug)]
pub struct Recommender<'a, M: EmbeddingModel + ?Sized> {
    graph: &'a CoPurchaseGraph,
    model: &'a M,
    walker: GraphWalker,
}

impl<'a, M: EmbeddingModel + ?Sized> Recommender<'a, M> {
    /// Create a recommender over a graph and embedding model.
    pub fn new(graph: &'a CoPurchaseGraph, model: &'a M) -> Self {
        Self {
            graph,
            model,
            walker: GraphWalker::new(),
        }
    }

    /// Replace the walker (e.g. a seeded one for reproducible tests).
    #[must_use]
    pub fn with_walker(mut self, walker: GraphWalker) -> Self {
        self.walker = walker;
        self
    }

    /// Produce display-ready recommendations for `item`.
    ///
    /// # Errors
    ///
    /// Propagates the dispatched strategy's errors; see
    /// [`similar_items`], [`top_neighbours`] and [`GraphWalker::walk`].
    pub fn recommend(&mut self, item: &str, options: &RecommendOptions) -> CoreResult<Vec<ItemName>> {
        debug!(item, strategy = ?options.strategy, "producing recommendations");

        let raw = match options.strategy {
            Strategy::Similar => similar_items(self.model, item, options.topn)?,
            Strategy::Neighbours => top_neighbours(self.graph, item, options.topn)?,
            Strategy::Walk => self.walker.walk(self.graph, item, &options.walk)?.items,
        };

        Ok(rank_for_display(raw, options.max_display))
    }
}

/// One user's shopping-list state.
///
/// Owned by the calling layer (one per UI session) and passed explicitly
/// into recommendation calls, replacing any notion of shared mutable
/// process state.
#[derive(Debug, Clone, Default)]
pub struct ShoppingSession {
    items: Vec<ItemName>,
    last_selected: Option<ItemName>,
}

impl ShoppingSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items added so far, in selection order.
    #[must_use]
    pub fn items(&self) -> &[ItemName] {
        &self.items
    }

    /// The most recently selected item, if any.
    #[must_use]
    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }

    /// Add `item` to the shopping list and remember it as the seed for
    /// the next recommendation round.
    pub fn select(&mut self, item: impl Into<ItemName>) {
        let item = item.into();
        self.last_selected = Some(item.clone());
        self.items.push(item);
    }

    /// Recommendations seeded from the last selection; empty when nothing
    /// has been selected yet.
    ///
    /// # Errors
    ///
    /// Propagates [`Recommender::recommend`] errors.
    pub fn recommend_next<M: EmbeddingModel + ?Sized>(
        &self,
        recommender: &mut Recommender<'_, M>,
        options: &RecommendOptions,
    ) -> CoreResult<Vec<ItemName>> {
        match self.last_selected.as_deref() {
            Some(last) => recommender.recommend(last, options),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::DenseEmbeddings;

    fn fixtures() -> (CoPurchaseGraph, DenseEmbeddings) {
        let mut graph = CoPurchaseGraph::new();
        graph.add_edge("Pears", "Apples", 5.0).unwrap();
        graph.add_edge("Pears", "Clotted Cream", 3.0).unwrap();
        graph.add_edge("Pears", "Figs", 1.0).unwrap();

        let mut model = DenseEmbeddings::new(2);
        model.insert("Pears", vec![1.0, 0.0]).unwrap();
        model.insert("Apples", vec![0.9, 0.1]).unwrap();
        model.insert("Figs", vec![0.5, 0.5]).unwrap();

        (graph, model)
    }

    #[test]
    fn test_rank_for_display_sorts_by_length_then_name() {
        let ranked = rank_for_display(
            vec![
                "Clotted Cream".to_string(),
                "Figs".to_string(),
                "Apples".to_string(),
                "Eggs".to_string(),
            ],
            10,
        );
        assert_eq!(ranked, vec!["Eggs", "Figs", "Apples", "Clotted Cream"]);
    }

    #[test]
    fn test_rank_for_display_caps_results() {
        let items: Vec<ItemName> = (0..30).map(|i| format!("Item {i:02}")).collect();
        assert_eq!(rank_for_display(items, 20).len(), 20);
    }

    #[test]
    fn test_recommend_dispatches_neighbours() {
        let (graph, model) = fixtures();
        let mut recommender = Recommender::new(&graph, &model);

        let options = RecommendOptions::default()
            .strategy(Strategy::Neighbours)
            .topn(2);
        let recs = recommender.recommend("Pears", &options).unwrap();

        // Top-2 neighbours by weight (Apples, Clotted Cream), re-ordered
        // for display by name length.
        assert_eq!(recs, vec!["Apples", "Clotted Cream"]);
    }

    #[test]
    fn test_recommend_dispatches_similar() {
        let (graph, model) = fixtures();
        let mut recommender = Recommender::new(&graph, &model);

        let options = RecommendOptions::default().strategy(Strategy::Similar);
        let recs = recommender.recommend("Pears", &options).unwrap();
        assert_eq!(recs, vec!["Figs", "Apples"]);
    }

    #[test]
    fn test_recommend_dispatches_walk() {
        let (graph, model) = fixtures();
        let mut recommender = Recommender::new(&graph, &model);

        let mut options = RecommendOptions::default().strategy(Strategy::Walk);
        options.walk = WalkParams::with_hops(1);
        let recs = recommender.recommend("Pears", &options).unwrap();
        assert_eq!(recs, vec!["Apples"]);
    }

    #[test]
    fn test_session_tracks_last_selected() {
        let mut session = ShoppingSession::new();
        assert_eq!(session.last_selected(), None);

        session.select("Pears");
        session.select("Apples");

        assert_eq!(session.last_selected(), Some("Apples"));
        assert_eq!(session.items(), ["Pears".to_string(), "Apples".to_string()]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let (graph, model) = fixtures();
        let mut recommender = Recommender::new(&graph, &model);
        let options = RecommendOptions::default().strategy(Strategy::Neighbours);

        let mut first = ShoppingSession::new();
        let second = ShoppingSession::new();

        first.select("Pears");

        // The untouched session still has no seed item; the selecting
        // session recommends from its own state.
        assert!(second.recommend_next(&mut recommender, &options).unwrap().is_empty());
        assert!(!first.recommend_next(&mut recommender, &options).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_next_without_selection_is_empty() {
        let (graph, model) = fixtures();
        let mut recommender = Recommender::new(&graph, &model);
        let session = ShoppingSession::new();

        let recs = session
            .recommend_next(&mut recommender, &RecommendOptions::default())
            .unwrap();
        assert!(recs.is_empty());
    }
}
