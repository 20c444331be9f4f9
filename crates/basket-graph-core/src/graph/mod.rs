//! In-memory co-purchase graph model.
//!
//! Nodes are grocery item names; edges carry a positive co-occurrence
//! weight (how strongly two items are bought together). The graph is
//! undirected: adjacency is stored symmetrically and every query treats
//! `(a, b)` and `(b, a)` as the same edge.
//!
//! Construction and pruning happen up front (see [`builder`]); the
//! recommendation operations only ever take `&CoPurchaseGraph`, so a
//! loaded graph is safe to share across concurrent requests.
//!
//! # Examples
//!
//! ```
//! use basket_graph_core::graph::CoPurchaseGraph;
//!
//! let mut graph = CoPurchaseGraph::new();
//! graph.add_edge("Pears", "Apples", 5.0).unwrap();
//! graph.add_edge("Pears", "Grapes", 2.0).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_weight("Apples", "Pears"), Some(5.0));
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{CoreError, CoreResult};

pub mod builder;

/// Item name type: the unique string identifying a graph node.
///
/// Names are matched case-sensitively everywhere in the core; callers
/// normalize before lookups that depend on it.
pub type ItemName = String;

/// Undirected, weighted co-purchase graph.
///
/// Invariants maintained by [`add_edge`](CoPurchaseGraph::add_edge):
/// - every stored edge has `weight > 0`
/// - no self-loops
/// - adjacency is symmetric
#[derive(Debug, Clone, Default)]
pub struct CoPurchaseGraph {
    adjacency: HashMap<ItemName, HashMap<ItemName, f32>>,
    edge_count: usize,
}

impl CoPurchaseGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `item` is a node of the graph.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.adjacency.contains_key(item)
    }

    /// Degree of `item`, or `None` for an unknown node.
    #[must_use]
    pub fn degree(&self, item: &str) -> Option<usize> {
        self.adjacency.get(item).map(HashMap::len)
    }

    /// Iterate over all node names (unordered).
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// All node names, sorted. This is the flat item list handed to the
    /// search index and the UI layer.
    #[must_use]
    pub fn node_names(&self) -> Vec<ItemName> {
        let mut names: Vec<ItemName> = self.adjacency.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Insert (or update) the undirected edge `a - b` with the given weight.
    ///
    /// Re-inserting an existing pair overwrites its weight.
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidEdge` - self-loop, or weight that is not a
    ///   positive finite number
    pub fn add_edge(
        &mut self,
        a: impl Into<ItemName>,
        b: impl Into<ItemName>,
        weight: f32,
    ) -> CoreResult<()> {
        let a = a.into();
        let b = b.into();

        if a == b {
            return Err(CoreError::InvalidEdge {
                from: a,
                to: b,
                reason: "self-loops are not allowed".to_string(),
            });
        }
        // `!(weight > 0.0)` also rejects NaN.
        if !(weight > 0.0) || !weight.is_finite() {
            return Err(CoreError::InvalidEdge {
                from: a,
                to: b,
                reason: format!("weight must be a positive finite number, got {weight}"),
            });
        }

        let previous = self
            .adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.adjacency.entry(b).or_default().insert(a, weight);

        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Remove a node and all of its edges. Unknown names are a no-op.
    pub fn remove_node(&mut self, item: &str) {
        if let Some(neighbours) = self.adjacency.remove(item) {
            self.edge_count -= neighbours.len();
            for name in neighbours.keys() {
                if let Some(adjacent) = self.adjacency.get_mut(name) {
                    adjacent.remove(item);
                }
            }
        }
    }

    /// Direct neighbours of `item` with their edge weights (unordered).
    ///
    /// # Errors
    ///
    /// * `CoreError::UnknownNode` - `item` is not in the graph
    pub fn neighbours(&self, item: &str) -> CoreResult<impl Iterator<Item = (&str, f32)> + '_> {
        let adjacent = self.adjacency.get(item).ok_or_else(|| CoreError::UnknownNode {
            item: item.to_string(),
        })?;
        Ok(adjacent.iter().map(|(name, weight)| (name.as_str(), *weight)))
    }

    /// Weight of the direct edge `a - b`, or `None` if the nodes are not
    /// adjacent (or unknown).
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f32> {
        self.adjacency.get(a).and_then(|adjacent| adjacent.get(b)).copied()
    }

    /// All nodes within `cutoff` graph distance of `item`, excluding
    /// `item` itself.
    ///
    /// Breadth-first enumeration; the result is sorted by name so callers
    /// (notably the walker) see a reproducible candidate order.
    ///
    /// # Errors
    ///
    /// * `CoreError::UnknownNode` - `item` is not in the graph
    pub fn neighbourhood_within(&self, item: &str, cutoff: usize) -> CoreResult<Vec<ItemName>> {
        if !self.contains(item) {
            return Err(CoreError::UnknownNode {
                item: item.to_string(),
            });
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut frontier: VecDeque<(&str, usize)> = VecDeque::new();
        let mut found: Vec<ItemName> = Vec::new();

        visited.insert(item);
        frontier.push_back((item, 0));

        while let Some((current, depth)) = frontier.pop_front() {
            if depth >= cutoff {
                continue;
            }
            if let Some(adjacent) = self.adjacency.get(current) {
                for name in adjacent.keys() {
                    if visited.insert(name.as_str()) {
                        found.push(name.clone());
                        frontier.push_back((name.as_str(), depth + 1));
                    }
                }
            }
        }

        found.sort_unstable();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_graph() -> CoPurchaseGraph {
        let mut graph = CoPurchaseGraph::new();
        graph.add_edge("Pears", "Apples", 5.0).unwrap();
        graph.add_edge("Pears", "Grapes", 2.0).unwrap();
        graph.add_edge("Grapes", "Wine", 8.0).unwrap();
        graph
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let graph = fruit_graph();
        assert_eq!(graph.edge_weight("Pears", "Apples"), Some(5.0));
        assert_eq!(graph.edge_weight("Apples", "Pears"), Some(5.0));
    }

    #[test]
    fn test_add_edge_overwrites_weight() {
        let mut graph = fruit_graph();
        graph.add_edge("Pears", "Apples", 9.0).unwrap();
        assert_eq!(graph.edge_weight("Apples", "Pears"), Some(9.0));
        assert_eq!(graph.edge_count(), 3, "overwrite must not add an edge");
    }

    #[test]
    fn test_add_edge_rejects_self_loop() {
        let mut graph = CoPurchaseGraph::new();
        let err = graph.add_edge("Pears", "Pears", 1.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEdge { .. }));
    }

    #[test]
    fn test_add_edge_rejects_bad_weights() {
        let mut graph = CoPurchaseGraph::new();
        for weight in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(
                graph.add_edge("Pears", "Apples", weight).is_err(),
                "weight {weight} must be rejected"
            );
        }
        assert_eq!(graph.node_count(), 0, "rejected edges must not create nodes");
    }

    #[test]
    fn test_counts() {
        let graph = fruit_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree("Pears"), Some(2));
        assert_eq!(graph.degree("Wine"), Some(1));
        assert_eq!(graph.degree("Bread"), None);
    }

    #[test]
    fn test_remove_node_drops_edges_both_sides() {
        let mut graph = fruit_graph();
        graph.remove_node("Grapes");
        assert!(!graph.contains("Grapes"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("Wine", "Grapes"), None);
        assert_eq!(graph.degree("Pears"), Some(1));
    }

    #[test]
    fn test_neighbourhood_cutoff_one_is_direct_neighbours() {
        let graph = fruit_graph();
        let hood = graph.neighbourhood_within("Pears", 1).unwrap();
        assert_eq!(hood, vec!["Apples".to_string(), "Grapes".to_string()]);
    }

    #[test]
    fn test_neighbourhood_cutoff_two_reaches_further() {
        let graph = fruit_graph();
        let hood = graph.neighbourhood_within("Pears", 2).unwrap();
        assert_eq!(
            hood,
            vec!["Apples".to_string(), "Grapes".to_string(), "Wine".to_string()]
        );
    }

    #[test]
    fn test_neighbourhood_excludes_start() {
        let graph = fruit_graph();
        // Cycle back to the start must not re-include it.
        let hood = graph.neighbourhood_within("Grapes", 3).unwrap();
        assert!(!hood.contains(&"Grapes".to_string()));
    }

    #[test]
    fn test_neighbourhood_unknown_node() {
        let graph = fruit_graph();
        let err = graph.neighbourhood_within("Bread", 1).unwrap_err();
        assert!(matches!(err, CoreError::UnknownNode { .. }));
    }

    #[test]
    fn test_node_names_sorted() {
        let graph = fruit_graph();
        let names = graph.node_names();
        assert_eq!(names, vec!["Apples", "Grapes", "Pears", "Wine"]);
    }
}
