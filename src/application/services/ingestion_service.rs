use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    CollectionConfig, Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter,
    TextSplitterError, VectorStore, VectorStoreError,
};
use crate::domain::{CollectionId, Document, ValidationReport};

use super::DocumentValidator;

/// Summary of a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub collection_id: CollectionId,
    pub page_count: usize,
    pub chunk_count: usize,
    pub validation: ValidationReport,
}

pub struct IngestionService {
    validator: DocumentValidator,
    file_loader: Arc<dyn FileLoader>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    text_splitter: Arc<dyn TextSplitter>,
    vector_dimensions: u64,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        text_splitter: Arc<dyn TextSplitter>,
        vector_dimensions: u64,
    ) -> Self {
        Self {
            validator: DocumentValidator::new(Arc::clone(&file_loader)),
            file_loader,
            embedder,
            vector_store,
            text_splitter,
            vector_dimensions,
        }
    }

    /// Ingests a staged upload. A file that fails validation is deleted
    /// before the rejection is returned.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestionReport, IngestionError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| IngestionError::Io(format!("invalid file name: {}", path.display())))?
            .to_string();

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| IngestionError::Io(e.to_string()))?;

        let result = self.ingest(&data, filename).await;

        if let Err(IngestionError::Rejected(_)) = &result {
            match tokio::fs::remove_file(path).await {
                Ok(()) => tracing::info!("Removed rejected upload"),
                Err(e) => tracing::warn!(error = %e, "Failed to remove rejected upload"),
            }
        }

        result
    }

    /// Validates, chunks, embeds and stores a document, replacing whatever
    /// the collection derived from `filename` held before.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn ingest(
        &self,
        data: &[u8],
        filename: String,
    ) -> Result<IngestionReport, IngestionError> {
        let document = Document::new(filename, data.len() as u64);
        let collection_id = document.collection_id.clone();

        let validation = self.validator.validate(data, &document).await;
        if !validation.is_valid {
            tracing::warn!(
                collection_id = %collection_id,
                keywords_matched = validation.keywords_matched,
                "Document rejected by legal keyword validation"
            );
            return Err(IngestionError::Rejected(validation));
        }

        let pages = self
            .file_loader
            .extract_pages(data, &document, None)
            .await
            .map_err(IngestionError::FileLoading)?;

        let chunks = self
            .text_splitter
            .split(&pages, &collection_id)
            .await
            .map_err(IngestionError::Splitting)?;

        tracing::debug!(
            pages = pages.len(),
            chunks = chunks.len(),
            model = self.embedder.model_name(),
            "Embedding chunks"
        );

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder
                .embed_batch(&texts)
                .await
                .map_err(IngestionError::Embedding)?
        };

        if embeddings.len() != chunks.len() {
            return Err(IngestionError::Embedding(EmbedderError::InvalidResponse(
                format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    embeddings.len()
                ),
            )));
        }

        self.vector_store
            .delete_collection(&collection_id)
            .await
            .map_err(IngestionError::Storage)?;
        self.vector_store
            .create_collection(
                &collection_id,
                &CollectionConfig::for_chunks(self.vector_dimensions),
            )
            .await
            .map_err(IngestionError::Storage)?;

        if !chunks.is_empty() {
            if let Err(e) = self
                .vector_store
                .upsert(&collection_id, &chunks, &embeddings)
                .await
            {
                // Previous contents are already gone; an empty collection
                // would otherwise read as ingested.
                tracing::error!(
                    collection_id = %collection_id,
                    error = %e,
                    "Upsert failed after collection was replaced"
                );
                if let Err(cleanup) = self.vector_store.delete_collection(&collection_id).await {
                    tracing::warn!(error = %cleanup, "Failed to drop partially built collection");
                }
                return Err(IngestionError::Storage(e));
            }
        }

        tracing::info!(
            collection_id = %collection_id,
            filename = %document.filename,
            chunks = chunks.len(),
            "Document ingested"
        );

        Ok(IngestionReport {
            collection_id,
            page_count: pages.len(),
            chunk_count: chunks.len(),
            validation,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("document rejected: {} legal keyword(s) matched", .0.keywords_matched)]
    Rejected(ValidationReport),
    #[error("io: {0}")]
    Io(String),
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
}
