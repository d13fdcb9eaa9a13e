use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::Reranker;
use crate::domain::{CollectionId, SearchResult};

use super::{ChunkRetriever, RetrievalError, dedupe_by_text};

/// How candidates are gathered before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    /// One vector search with the question as asked.
    #[default]
    Direct,
    /// Vector searches with the question and its LLM paraphrases.
    MultiQuery,
}

pub struct RetrievalPipeline {
    retriever: Arc<dyn ChunkRetriever>,
    reranker: Option<Arc<dyn Reranker>>,
    top_n: usize,
}

impl RetrievalPipeline {
    pub fn new(
        retriever: Arc<dyn ChunkRetriever>,
        reranker: Option<Arc<dyn Reranker>>,
        top_n: usize,
    ) -> Self {
        Self {
            retriever,
            reranker,
            top_n,
        }
    }

    /// Returns at most `top_n` results ordered by non-increasing score.
    #[tracing::instrument(skip(self, question), fields(collection = %collection, top_n = self.top_n))]
    pub async fn retrieve(
        &self,
        question: &str,
        collection: &CollectionId,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        let candidates = dedupe_by_text(self.retriever.fetch(question, collection).await?);
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let mut scored = match &self.reranker {
            Some(reranker) => {
                let chunks = candidates.into_iter().map(|r| r.chunk).collect();
                reranker.score(question, chunks).await?
            }
            None => candidates,
        };

        rank(&mut scored);
        scored.truncate(self.top_n);

        tracing::info!(
            results = scored.len(),
            reranked = self.reranker.is_some(),
            "Retrieval complete"
        );
        Ok(scored)
    }
}

/// Stable descending sort; NaN scores go last.
fn rank(results: &mut [SearchResult]) {
    results.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    });
}
