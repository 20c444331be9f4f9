//! Dense in-memory embedding store.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::graph::ItemName;

use super::EmbeddingModel;

/// Fixed-dimension dense vectors keyed by item name, queried by cosine
/// similarity.
///
/// Similarity queries scan the whole vocabulary, which is plenty for the
/// few thousand items a co-purchase graph carries.
#[derive(Debug, Clone)]
pub struct DenseEmbeddings {
    vectors: HashMap<ItemName, Vec<f32>>,
    dimension: usize,
}

impl DenseEmbeddings {
    /// Create an empty model for vectors of the given dimension.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimension,
        }
    }

    /// Vector dimension this model was created with.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of items in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Insert (or replace) an item's vector.
    ///
    /// # Errors
    ///
    /// * `CoreError::DimensionMismatch` - vector length differs from the
    ///   model dimension
    pub fn insert(&mut self, item: impl Into<ItemName>, vector: Vec<f32>) -> CoreResult<()> {
        if vector.len() != self.dimension {
            return Err(CoreError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.vectors.insert(item.into(), vector);
        Ok(())
    }

    /// Cosine similarity in [-1, 1]; 0.0 for a zero-norm vector.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

impl EmbeddingModel for DenseEmbeddings {
    fn contains(&self, item: &str) -> bool {
        self.vectors.contains_key(item)
    }

    fn most_similar(&self, item: &str, topn: usize) -> CoreResult<Vec<(ItemName, f32)>> {
        let query = self.vectors.get(item).ok_or_else(|| CoreError::UnknownItem {
            item: item.to_string(),
        })?;

        if topn == 0 {
            warn!(item, "most_similar called with topn=0, returning empty");
            return Ok(Vec::new());
        }

        let mut scored: Vec<(ItemName, f32)> = self
            .vectors
            .iter()
            .filter(|(name, _)| name.as_str() != item)
            .map(|(name, vector)| (name.clone(), Self::cosine_similarity(query, vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(topn);

        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_model() -> DenseEmbeddings {
        let mut model = DenseEmbeddings::new(3);
        model.insert("Pears", vec![1.0, 0.0, 0.0]).unwrap();
        model.insert("Apples", vec![0.9, 0.1, 0.0]).unwrap();
        model.insert("Grapes", vec![0.2, 0.8, 0.0]).unwrap();
        model.insert("Bleach", vec![0.0, 0.0, 1.0]).unwrap();
        model
    }

    #[test]
    fn test_most_similar_orders_by_cosine() {
        let model = fruit_model();
        let similar = model.most_similar("Pears", 10).unwrap();

        let names: Vec<&str> = similar.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Apples", "Grapes", "Bleach"]);

        // Scores descend.
        for pair in similar.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_most_similar_excludes_query_item() {
        let model = fruit_model();
        let similar = model.most_similar("Pears", 10).unwrap();
        assert!(similar.iter().all(|(n, _)| n != "Pears"));
    }

    #[test]
    fn test_most_similar_respects_topn() {
        let model = fruit_model();
        assert_eq!(model.most_similar("Pears", 2).unwrap().len(), 2);
        // Fewer comparable items than topn is fine.
        assert_eq!(model.most_similar("Pears", 50).unwrap().len(), 3);
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut model = DenseEmbeddings::new(3);
        let err = model.insert("Pears", vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_zero_vector_scores_zero_not_nan() {
        let mut model = DenseEmbeddings::new(2);
        model.insert("Pears", vec![1.0, 0.0]).unwrap();
        model.insert("Nothing", vec![0.0, 0.0]).unwrap();

        let similar = model.most_similar("Pears", 10).unwrap();
        let nothing = similar.iter().find(|(n, _)| n == "Nothing").unwrap();
        assert_eq!(nothing.1, 0.0);
    }

    #[test]
    fn test_contains() {
        let model = fruit_model();
        assert!(model.contains("Pears"));
        assert!(!model.contains("pears"), "lookups are case-sensitive");
    }
}
