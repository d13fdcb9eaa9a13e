use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::application::ports::LlmClient;
use crate::domain::{CollectionId, SearchResult};

use super::{ChunkRetriever, RetrievalError, VectorRetriever, dedupe_by_text};

const EXPANSION_PROMPT: &str = "You are an AI language model assistant. Your task is to generate \
{count} different versions of the given user question to retrieve relevant documents from a \
vector database. By generating multiple perspectives on the user question, your goal is to help \
the user overcome some of the limitations of distance-based similarity search. Provide these \
alternative questions separated by newlines and nothing else.\nOriginal question: {question}";

/// Widens recall by searching with LLM-generated paraphrases of the question.
pub struct MultiQueryRetriever {
    inner: VectorRetriever,
    llm_client: Arc<dyn LlmClient>,
    query_count: usize,
}

impl MultiQueryRetriever {
    pub fn new(inner: VectorRetriever, llm_client: Arc<dyn LlmClient>, query_count: usize) -> Self {
        Self {
            inner,
            llm_client,
            query_count,
        }
    }

    async fn expand(&self, question: &str) -> Result<Vec<String>, RetrievalError> {
        let prompt = EXPANSION_PROMPT
            .replace("{count}", &self.query_count.to_string())
            .replace("{question}", question);
        let reply = self.llm_client.complete(&prompt).await?;
        Ok(parse_query_variants(&reply, self.query_count))
    }
}

/// Splits an LLM reply into at most `limit` distinct, non-empty questions.
/// Leading list markers such as `1.`, `2)`, `-` or `*` are stripped.
pub fn parse_query_variants(reply: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    reply
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_lowercase()))
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();
    let without_digits = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
    let unnumbered = if without_digits.len() < trimmed.len() {
        without_digits
            .strip_prefix('.')
            .or_else(|| without_digits.strip_prefix(')'))
            .unwrap_or(trimmed)
    } else {
        trimmed
    };
    unnumbered
        .trim_start_matches(['-', '*', '•'])
        .trim()
}

#[async_trait]
impl ChunkRetriever for MultiQueryRetriever {
    #[tracing::instrument(skip(self, query), fields(collection = %collection, query_count = self.query_count))]
    async fn fetch(
        &self,
        query: &str,
        collection: &CollectionId,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        // No expansion call for a collection that was never ingested.
        self.inner.ensure_collection(collection).await?;

        let variants = self.expand(query).await?;
        tracing::debug!(variants = variants.len(), "Query expanded");

        let queries = std::iter::once(query)
            .chain(variants.iter().map(String::as_str).filter(|v| *v != query));
        let merged: Vec<SearchResult> =
            try_join_all(queries.map(|q| self.inner.fetch(q, collection)))
                .await?
                .into_iter()
                .flatten()
                .collect();

        let merged_len = merged.len();
        let unique = dedupe_by_text(merged);
        tracing::debug!(
            merged = merged_len,
            unique = unique.len(),
            "Multi-query candidates merged"
        );
        Ok(unique)
    }
}
