//! Direct-neighbour ranking.
//!
//! The "bought together" recommendation strategy: rank the items sharing
//! an edge with the selected one by co-occurrence weight and take the
//! strongest few.

use std::cmp::Ordering;

use tracing::warn;

use crate::error::CoreResult;
use crate::graph::{CoPurchaseGraph, ItemName};

/// Return the up-to-`topn` direct neighbours of `item`, strongest edge
/// first.
///
/// Ties on weight break by name so the ranking is stable across runs.
/// Neighbours are inherently distinct nodes, so no duplicate handling is
/// needed here.
///
/// # Errors
///
/// * `CoreError::UnknownNode` - `item` is not in the graph
///
/// # Examples
///
/// ```
/// use basket_graph_core::graph::CoPurchaseGraph;
/// use basket_graph_core::neighbours::top_neighbours;
///
/// let mut graph = CoPurchaseGraph::new();
/// graph.add_edge("A", "B", 5.0).unwrap();
/// graph.add_edge("A", "C", 1.0).unwrap();
///
/// assert_eq!(top_neighbours(&graph, "A", 2).unwrap(), vec!["B", "C"]);
/// ```
pub fn top_neighbours(
    graph: &CoPurchaseGraph,
    item: &str,
    topn: usize,
) -> CoreResult<Vec<ItemName>> {
    let mut ranked: Vec<(ItemName, f32)> = graph
        .neighbours(item)?
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

    if topn == 0 {
        warn!(item, "top_neighbours called with topn=0, returning empty");
        return Ok(Vec::new());
    }

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(topn);

    Ok(ranked.into_iter().map(|(name, _)| name).collect())
}
