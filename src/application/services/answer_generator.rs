use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{PromptTemplate, SearchResult};

const EMPTY_CONTEXT: &str = "No relevant documents found.";

pub struct AnswerGenerator {
    llm_client: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(skip_all, fields(template = %template.kind, results = results.len()))]
    pub async fn generate(
        &self,
        question: &str,
        results: &[SearchResult],
        template: &PromptTemplate,
    ) -> Result<String, GenerationError> {
        let context = format_context(results);
        let prompt = template.render(&context, question);

        tracing::debug!(
            context_chars = context.chars().count(),
            prompt_chars = prompt.chars().count(),
            "Prompt rendered"
        );

        let answer = self.llm_client.complete(&prompt).await?;
        if answer.trim().is_empty() {
            tracing::warn!("Model returned an empty answer");
        }
        Ok(answer)
    }
}

/// Renders retrieved chunks as the context block of a prompt.
pub fn format_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    results
        .iter()
        .map(|r| {
            let page = r
                .chunk
                .page
                .map_or_else(|| "N/A".to_string(), |p| p.to_string());
            format!("Source: Page {page}\nContent: {}", r.chunk.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
