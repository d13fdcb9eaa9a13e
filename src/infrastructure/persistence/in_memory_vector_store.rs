use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use crate::domain::{Chunk, CollectionId, Embedding, SearchResult};

struct StoredCollection {
    dimensions: u64,
    points: Vec<(Chunk, Embedding)>,
}

/// Process-local vector store with exact cosine search. Contents are lost on
/// restart.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<CollectionId, StoredCollection>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn point_count(&self, collection: &CollectionId) -> Option<usize> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.points.len())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(
        &self,
        collection: &CollectionId,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(collection) {
            return Ok(false);
        }
        collections.insert(
            collection.clone(),
            StoredCollection {
                dimensions: config.vector_dimensions,
                points: Vec::new(),
            },
        );
        Ok(true)
    }

    async fn collection_exists(&self, collection: &CollectionId) -> Result<bool, VectorStoreError> {
        Ok(self.collections.read().await.contains_key(collection))
    }

    async fn delete_collection(&self, collection: &CollectionId) -> Result<(), VectorStoreError> {
        self.collections.write().await.remove(collection);
        Ok(())
    }

    async fn upsert(
        &self,
        collection: &CollectionId,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(collection)
            .ok_or_else(|| VectorStoreError::CollectionNotFound(collection.to_string()))?;

        if let Some(bad) = embeddings
            .iter()
            .find(|e| e.dimensions() as u64 != stored.dimensions)
        {
            return Err(VectorStoreError::UpsertFailed(format!(
                "expected {} dimensions, got {}",
                stored.dimensions,
                bad.dimensions()
            )));
        }

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            stored.points.retain(|(existing, _)| existing.id != chunk.id);
            stored.points.push((chunk.clone(), embedding.clone()));
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &CollectionId,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let collections = self.collections.read().await;
        let stored = collections
            .get(collection)
            .ok_or_else(|| VectorStoreError::CollectionNotFound(collection.to_string()))?;

        let mut results: Vec<SearchResult> = stored
            .points
            .iter()
            .map(|(chunk, stored_embedding)| {
                SearchResult::new(chunk.clone(), embedding.cosine_similarity(stored_embedding))
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        Ok(results)
    }
}
