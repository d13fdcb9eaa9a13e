use async_trait::async_trait;

use crate::domain::{Document, PageText};

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Extracts page texts in page order. `max_pages` caps how many pages
    /// are read from the start of the document.
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
        max_pages: Option<usize>,
    ) -> Result<Vec<PageText>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
