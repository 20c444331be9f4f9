//! Graph construction from co-purchase pair counts.
//!
//! The upstream pipeline produces ranked `((item, item), count)` rows;
//! these helpers turn them into a [`CoPurchaseGraph`] and thin out items
//! too weakly connected to be worth recommending from.

use tracing::debug;

use crate::error::CoreResult;
use crate::graph::{CoPurchaseGraph, ItemName};

/// Build a graph from co-purchase pair counts.
///
/// Each row becomes one undirected edge; a repeated pair overwrites the
/// earlier weight. Row order therefore only matters for duplicates.
///
/// # Errors
///
/// * `CoreError::InvalidEdge` - a row is a self-pair or carries a
///   non-positive/NaN count
///
/// # Examples
///
/// ```
/// use basket_graph_core::graph::builder::from_pair_counts;
///
/// let graph = from_pair_counts([
///     (("Pears".to_string(), "Apples".to_string()), 12.0),
///     (("Pears".to_string(), "Grapes".to_string()), 4.0),
/// ])
/// .unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// ```
pub fn from_pair_counts<I>(pairs: I) -> CoreResult<CoPurchaseGraph>
where
    I: IntoIterator<Item = ((ItemName, ItemName), f32)>,
{
    let mut graph = CoPurchaseGraph::new();
    for ((a, b), count) in pairs {
        graph.add_edge(a, b, count)?;
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built graph from pair counts"
    );
    Ok(graph)
}

/// Remove every node with fewer than `min_degree` edges.
///
/// Single pass over a snapshot of the node set: degrees are evaluated
/// before any removal, so a node kept here can end up below the threshold
/// once a sparse neighbour is dropped. The threshold is a rough density
/// filter for display, not an invariant, so no fixpoint iteration.
#[must_use]
pub fn prune_min_degree(mut graph: CoPurchaseGraph, min_degree: usize) -> CoPurchaseGraph {
    let sparse: Vec<ItemName> = graph
        .nodes()
        .filter(|name| graph.degree(name).unwrap_or(0) < min_degree)
        .map(str::to_string)
        .collect();

    for name in &sparse {
        graph.remove_node(name);
    }
    debug!(
        removed = sparse.len(),
        remaining = graph.node_count(),
        min_degree,
        "pruned sparse nodes"
    );
    graph
}
