use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, PageText};

use super::text_sanitizer::sanitize_page_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Page-by-page text extraction from PDF bytes.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_pages(data: &[u8], max_pages: Option<usize>) -> Result<Vec<PageText>, FileLoaderError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(FileLoaderError::ExtractionFailed(
                "encrypted PDFs are not supported".to_string(),
            ));
        }

        let page_numbers: Vec<u32> = doc
            .get_pages()
            .into_keys()
            .take(max_pages.unwrap_or(usize::MAX))
            .collect();

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            match doc.extract_text(&[number]) {
                Ok(raw) => {
                    let text = sanitize_page_text(&raw);
                    if !text.is_empty() {
                        pages.push(PageText::new(number, text));
                    }
                }
                Err(e) => {
                    tracing::warn!(page = number, error = %e, "Skipping unreadable page");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            collection_id = %document.collection_id,
            filename = %document.filename,
        )
    )]
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
        max_pages: Option<usize>,
    ) -> Result<Vec<PageText>, FileLoaderError> {
        if !document.has_pdf_extension() {
            return Err(FileLoaderError::UnsupportedFile(document.filename.clone()));
        }

        let bytes = data.to_vec();
        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(&bytes, max_pages)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(pages)
    }
}
