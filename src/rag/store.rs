//! VectorStore trait: abstract interface over the hosted vector index.
//!
//! The primary implementation is `PineconeIndex` in the `pinecone` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One nearest-neighbor match: the stored text plus its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMatch {
    pub text: String,
    pub score: f32,
}

/// Abstract trait over the remote vector index.
///
/// Vectors are keyed by a caller-supplied id and carry the source text as
/// metadata; queries rank by cosine similarity.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert one (id, vector, text) triple.
    async fn upsert(&self, id: &str, values: &[f32], text: &str) -> Result<(), ApiError>;

    /// Return the `top_k` stored entries nearest to `values`.
    async fn query(&self, values: &[f32], top_k: usize) -> Result<Vec<ContextMatch>, ApiError>;
}
