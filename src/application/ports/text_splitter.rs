use async_trait::async_trait;

use crate::domain::{Chunk, CollectionId, PageText};

#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split(
        &self,
        pages: &[PageText],
        collection_id: &CollectionId,
    ) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("invalid splitter configuration: {0}")]
    InvalidConfiguration(String),
}
