//! Weighted graph walks.
//!
//! Simulates a "next item for the basket" sequence: starting from a chosen
//! item, repeatedly hop to a neighbour picked by co-occurrence weight,
//! either greedily (strongest edge first) or by weighted random sampling.
//! Visited items are avoided within a bounded retry budget so one walk
//! reads like a varied shopping list rather than a loop between two
//! staples.
//!
//! See [`GraphWalker::walk`] for the hop-by-hop contract.

pub mod types;

mod walker;


pub use types::{WalkMode, WalkOutcome, WalkParams};
pub use walker::GraphWalker;
