use crate::domain::{Answer, CollectionId};

use super::{
    AnswerGenerator, GenerationError, PromptSelector, RetrievalError, RetrievalPipeline,
};

/// Answers questions, either grounded in an ingested collection or straight
/// from the model.
pub struct QaService {
    pipeline: RetrievalPipeline,
    selector: PromptSelector,
    generator: AnswerGenerator,
}

impl QaService {
    pub fn new(
        pipeline: RetrievalPipeline,
        selector: PromptSelector,
        generator: AnswerGenerator,
    ) -> Self {
        Self {
            pipeline,
            selector,
            generator,
        }
    }

    #[tracing::instrument(skip(self, question), fields(collection = %collection, mode = ?mode))]
    pub async fn ask_with_context(
        &self,
        question: &str,
        collection: &CollectionId,
        mode: Option<&str>,
    ) -> Result<Answer, QaError> {
        let results = self.pipeline.retrieve(question, collection).await?;
        let template = self.selector.select(question, mode);
        let text = self
            .generator
            .generate(question, &results, &template)
            .await?;

        tracing::info!(
            template = %template.kind,
            sources = results.len(),
            "Answered with context"
        );
        Ok(Answer::with_results(text, results))
    }

    #[tracing::instrument(skip_all)]
    pub async fn ask_direct(&self, question: &str) -> Result<Answer, QaError> {
        let text = self
            .generator
            .generate(question, &[], &PromptSelector::direct())
            .await?;
        Ok(Answer::without_sources(text))
    }

    pub fn modes(&self) -> Vec<String> {
        self.selector.modes()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl QaError {
    pub fn is_collection_not_found(&self) -> bool {
        matches!(
            self,
            QaError::Retrieval(RetrievalError::CollectionNotFound(_))
        )
    }
}
