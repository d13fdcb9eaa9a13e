use std::collections::HashSet;

use async_trait::async_trait;

use crate::application::ports::{EmbedderError, LlmClientError, RerankerError, VectorStoreError};
use crate::domain::{CollectionId, SearchResult};

/// Produces candidate chunks for a query from one collection.
#[async_trait]
pub trait ChunkRetriever: Send + Sync {
    async fn fetch(
        &self,
        query: &str,
        collection: &CollectionId,
    ) -> Result<Vec<SearchResult>, RetrievalError>;
}

/// Keeps the first occurrence of every distinct chunk text, preserving order.
pub fn dedupe_by_text(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.chunk.text.clone()))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionId),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("query expansion: {0}")]
    QueryExpansion(#[from] LlmClientError),
    #[error("reranking: {0}")]
    Reranking(#[from] RerankerError),
}
