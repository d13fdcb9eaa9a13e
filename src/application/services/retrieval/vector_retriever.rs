use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{Embedder, VectorStore, VectorStoreError};
use crate::domain::{CollectionId, SearchResult};

use super::{ChunkRetriever, RetrievalError};

/// Nearest-neighbour search over a single collection.
pub struct VectorRetriever {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    fetch_k: usize,
}

impl VectorRetriever {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        fetch_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            fetch_k,
        }
    }

    /// Fails with `CollectionNotFound` unless the collection has been ingested.
    pub async fn ensure_collection(&self, collection: &CollectionId) -> Result<(), RetrievalError> {
        if self.vector_store.collection_exists(collection).await? {
            Ok(())
        } else {
            Err(RetrievalError::CollectionNotFound(collection.clone()))
        }
    }
}

#[async_trait]
impl ChunkRetriever for VectorRetriever {
    #[tracing::instrument(skip(self, query), fields(collection = %collection, fetch_k = self.fetch_k))]
    async fn fetch(
        &self,
        query: &str,
        collection: &CollectionId,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        self.ensure_collection(collection).await?;

        let query_embedding = self.embedder.embed(query).await?;

        let results = self
            .vector_store
            .search(collection, &query_embedding, self.fetch_k)
            .await
            .map_err(|e| match e {
                VectorStoreError::CollectionNotFound(_) => {
                    RetrievalError::CollectionNotFound(collection.clone())
                }
                other => RetrievalError::Search(other),
            })?;

        tracing::debug!(candidates = results.len(), "Vector search complete");
        Ok(results)
    }
}
