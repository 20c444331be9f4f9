//! Embedding-based similarity recommendations.
//!
//! The model itself is trained and loaded elsewhere; this module defines
//! the read-only query surface the recommender needs ([`EmbeddingModel`]),
//! a dense in-memory implementation ([`DenseEmbeddings`]), and the
//! score-discarding wrapper the UI consumes ([`similar_items`]).

use crate::error::CoreResult;
use crate::graph::ItemName;

mod dense;

pub use dense::DenseEmbeddings;

/// Read-only item-embedding model.
///
/// Implementations are immutable for the process lifetime once loaded and
/// safe to query concurrently (`&self` only).
pub trait EmbeddingModel {
    /// Whether `item` has a vector in the model's vocabulary.
    fn contains(&self, item: &str) -> bool;

    /// The up-to-`topn` items most similar to `item`, ordered by
    /// descending similarity, with scores. `item` itself is excluded.
    ///
    /// # Errors
    ///
    /// * `CoreError::UnknownItem` - `item` has no vector
    fn most_similar(&self, item: &str, topn: usize) -> CoreResult<Vec<(ItemName, f32)>>;
}

/// The up-to-`topn` items most similar to `item`, in the model's own
/// ranked order, scores discarded.
///
/// # Errors
///
/// * `CoreError::UnknownItem` - propagated from the model
///
/// # Examples
///
/// ```
/// use basket_graph_core::embedding::{similar_items, DenseEmbeddings};
///
/// let mut model = DenseEmbeddings::new(2);
/// model.insert("Pears", vec![1.0, 0.0]).unwrap();
/// model.insert("Apples", vec![0.9, 0.1]).unwrap();
/// model.insert("Bleach", vec![0.0, 1.0]).unwrap();
///
/// let similar = similar_items(&model, "Pears", 1).unwrap();
/// assert_eq!(similar, vec!["Apples"]);
/// ```
pub fn similar_items<M>(model: &M, item: &str, topn: usize) -> CoreResult<Vec<ItemName>>
where
    M: EmbeddingModel + ?Sized,
{
    Ok(model
        .most_similar(item, topn)?
        .into_iter()
        .map(|(name, _)| name)
        .collect())
}
