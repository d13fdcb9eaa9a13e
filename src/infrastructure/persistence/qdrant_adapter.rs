use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType, PointId,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, Value, VectorParamsBuilder,
    VectorsConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{CollectionConfig, VectorStore, VectorStoreError};
use crate::domain::{Chunk, ChunkId, CollectionId, Embedding, SearchResult};

/// One Qdrant collection per ingested document.
pub struct QdrantAdapter {
    client: Arc<Qdrant>,
}

impl QdrantAdapter {
    pub fn new(url: &str) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn with_client(client: Arc<Qdrant>) -> Self {
        Self { client }
    }

    fn chunk_payload(chunk: &Chunk) -> HashMap<String, serde_json::Value> {
        let mut payload = HashMap::new();
        payload.insert(
            "collection_id".to_string(),
            serde_json::Value::String(chunk.collection_id.to_string()),
        );
        payload.insert(
            "text".to_string(),
            serde_json::Value::String(chunk.text.clone()),
        );
        payload.insert(
            "page".to_string(),
            chunk
                .page
                .map(|p| serde_json::Value::Number(p.into()))
                .unwrap_or(serde_json::Value::Null),
        );
        payload.insert(
            "offset".to_string(),
            serde_json::Value::Number((chunk.offset as u64).into()),
        );
        payload
    }

    fn chunk_from_point(
        collection: &CollectionId,
        id: Option<PointId>,
        payload: &HashMap<String, Value>,
    ) -> Option<Chunk> {
        let chunk_id = match id?.point_id_options? {
            PointIdOptions::Uuid(uuid) => Uuid::parse_str(&uuid).ok()?,
            PointIdOptions::Num(_) => return None,
        };

        let text = payload.get("text")?.as_str()?.to_string();
        let page = payload
            .get("page")
            .and_then(|v| v.as_integer())
            .and_then(|v| u32::try_from(v).ok());
        let offset = payload
            .get("offset")
            .and_then(|v| v.as_integer())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);

        Some(Chunk {
            id: ChunkId::from_uuid(chunk_id),
            collection_id: collection.clone(),
            text,
            page,
            offset,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %collection))]
    async fn create_collection(
        &self,
        collection: &CollectionId,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        if self.collection_exists(collection).await? {
            info!(collection = %collection, "collection already exists");
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Distance::Cosine,
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(collection.as_str()).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %collection, "collection_created");

        for field in &config.integer_indexes {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    collection.as_str(),
                    field,
                    FieldType::Integer,
                ))
                .await
                .map_err(|e| VectorStoreError::PayloadIndexFailed(e.to_string()))?;

            info!(
                collection = %collection,
                field = %field,
                "payload_index_applied"
            );
        }

        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %collection))]
    async fn collection_exists(&self, collection: &CollectionId) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(collection.as_str())
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(collection = %collection))]
    async fn delete_collection(&self, collection: &CollectionId) -> Result<(), VectorStoreError> {
        if !self.collection_exists(collection).await? {
            return Ok(());
        }

        self.client
            .delete_collection(collection.as_str())
            .await
            .map_err(|e| VectorStoreError::CollectionDeletionFailed(e.to_string()))?;

        info!(collection = %collection, "collection_deleted");
        Ok(())
    }

    #[instrument(skip(self, chunks, embeddings), fields(collection = %collection, count = chunks.len()))]
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

        let points: Vec<PointStruct> = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(chunk, embedding)| {
                PointStruct::new(
                    PointId::from(chunk.id.as_uuid().to_string()),
                    embedding.values.clone(),
                    Self::chunk_payload(chunk),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection.as_str(), points).wait(true))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %collection, count = chunks.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %collection, top_k = top_k))]
    async fn search(
        &self,
        collection: &CollectionId,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        if !self.collection_exists(collection).await? {
            return Err(VectorStoreError::CollectionNotFound(collection.to_string()));
        }

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(collection.as_str(), embedding.values.clone(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results: Vec<SearchResult> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk = Self::chunk_from_point(collection, point.id, &point.payload)?;
                Some(SearchResult::new(chunk, point.score))
            })
            .collect();

        Ok(results)
    }
}
