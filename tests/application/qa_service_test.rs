use std::sync::Arc;

use lexcase::application::services::{
    AnswerGenerator, PromptSelector, QaService, RetrievalPipeline, VectorRetriever,
};
use lexcase::infrastructure::persistence::InMemoryVectorStore;
use lexcase::infrastructure::prompts::JsonTemplateRegistry;

use crate::helpers::{
    HashEmbedder, RecordingLlmClient, StaticRetriever, collection, result,
};

fn service_with(
    pipeline: RetrievalPipeline,
    llm: Arc<RecordingLlmClient>,
) -> QaService {
    QaService::new(
        pipeline,
        PromptSelector::new(Arc::new(JsonTemplateRegistry::empty())),
        AnswerGenerator::new(llm),
    )
}

#[tokio::test]
async fn given_retrieved_chunks_when_asking_with_context_then_answer_cites_them() {
    let llm = RecordingLlmClient::new("Bail was granted.");
    let retriever = StaticRetriever::new(vec![
        result("Bail granted on conditions.", 3, 0.9),
        result("The accused shall report weekly.", 4, 0.7),
    ]);
    let service = service_with(RetrievalPipeline::new(retriever, None, 5), llm.clone());

    let answer = service
        .ask_with_context("Was bail granted?", &collection(), None)
        .await
        .unwrap();

    assert_eq!(answer.text, "Bail was granted.");
    assert_eq!(answer.sources.len(), 2);
    assert_eq!(answer.sources[0].content, "Bail granted on conditions.");
    assert_eq!(answer.sources[0].page, Some(3));

    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("Source: Page 3\nContent: Bail granted on conditions."));
    assert!(prompt.contains("Was bail granted?"));
}

#[tokio::test]
async fn given_unknown_collection_when_asking_with_context_then_not_found_and_no_completion() {
    let llm = RecordingLlmClient::new("unused");
    let retriever = Arc::new(VectorRetriever::new(
        Arc::new(HashEmbedder),
        Arc::new(InMemoryVectorStore::new()),
        10,
    ));
    let service = service_with(RetrievalPipeline::new(retriever, None, 3), llm.clone());

    let error = service
        .ask_with_context("Anything?", &collection(), None)
        .await
        .unwrap_err();

    assert!(error.is_collection_not_found());
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn given_question_when_asking_directly_then_no_sources_and_question_in_prompt() {
    let llm = RecordingLlmClient::new("Anticipatory bail is pre-arrest bail.");
    let service = service_with(
        RetrievalPipeline::new(StaticRetriever::new(Vec::new()), None, 3),
        llm.clone(),
    );

    let answer = service
        .ask_direct("What is anticipatory bail?")
        .await
        .unwrap();

    assert_eq!(answer.text, "Anticipatory bail is pre-arrest bail.");
    assert!(answer.sources.is_empty());
    assert!(llm.prompts()[0].contains("Question: What is anticipatory bail?"));
}
