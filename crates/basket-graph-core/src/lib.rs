//! Basket Graph Core Library
//!
//! The recommendation core behind a grocery co-purchase dashboard:
//! explore a weighted co-occurrence graph and build a shopping list from
//! ranked, non-repeating item suggestions.
//!
//! # Architecture
//!
//! - [`graph`] - the in-memory co-purchase graph model and its builder
//! - [`search`] - substring lookup over item names, seeding a flow
//! - [`walk`] - weighted greedy / random hop traversal
//! - [`neighbours`] - direct neighbours ranked by edge weight
//! - [`embedding`] - embedding-model trait and similarity queries
//! - [`recommend`] - strategy dispatch, display ranking, session state
//! - [`config`] / [`error`] - configuration and the central error type
//!
//! The graph and embedding model are loaded once and only ever borrowed
//! immutably by the recommendation operations, so they can be shared
//! across concurrent sessions without locking.
//!
//! # Example
//!
//! ```
//! use basket_graph_core::graph::CoPurchaseGraph;
//! use basket_graph_core::search::find_items;
//! use basket_graph_core::neighbours::top_neighbours;
//!
//! let mut graph = CoPurchaseGraph::new();
//! graph.add_edge("Pears", "Apples", 5.0).unwrap();
//! graph.add_edge("Pears", "Pear Jam", 2.0).unwrap();
//!
//! let hits = find_items(graph.nodes(), "Pear");
//! assert_eq!(hits.len(), 2);
//!
//! let top = top_neighbours(&graph, "Pears", 10).unwrap();
//! assert_eq!(top, vec!["Apples", "Pear Jam"]);
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod neighbours;
pub mod recommend;
pub mod search;
pub mod walk;

// Re-exports for convenience
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use graph::{CoPurchaseGraph, ItemName};
pub use recommend::{RecommendOptions, Recommender, ShoppingSession, Strategy};
