use async_trait::async_trait;

use crate::domain::{Chunk, SearchResult};

/// Scores (query, chunk) pairs jointly for relevance.
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Returns one result per input chunk, in input order.
    async fn score(&self, query: &str, chunks: Vec<Chunk>)
    -> Result<Vec<SearchResult>, RerankerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RerankerError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
