use async_trait::async_trait;

use super::{CollectionConfig, VectorStoreError};
use crate::domain::{Chunk, CollectionId, Embedding, SearchResult};

/// Collection-partitioned vector storage.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Returns `false` when the collection already existed.
    async fn create_collection(
        &self,
        collection: &CollectionId,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError>;

    async fn collection_exists(&self, collection: &CollectionId) -> Result<bool, VectorStoreError>;

    /// Deleting a missing collection is not an error.
    async fn delete_collection(&self, collection: &CollectionId) -> Result<(), VectorStoreError>;

    async fn upsert(
        &self,
        collection: &CollectionId,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    /// Nearest chunks by vector similarity, best first.
    async fn search(
        &self,
        collection: &CollectionId,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}
