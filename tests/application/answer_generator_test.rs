use std::sync::Arc;

use lexcase::application::services::{AnswerGenerator, GenerationError, format_context};
use lexcase::domain::{Chunk, PromptKind, PromptTemplate, SearchResult};

use crate::helpers::{FailingLlmClient, RecordingLlmClient, collection, result};

#[test]
fn given_results_when_formatting_context_then_each_source_is_labelled_with_its_page() {
    let context = format_context(&[result("First holding.", 2, 0.9), result("Second.", 7, 0.5)]);

    assert_eq!(
        context,
        "Source: Page 2\nContent: First holding.\n\nSource: Page 7\nContent: Second."
    );
}

#[test]
fn given_result_without_page_when_formatting_context_then_page_is_not_available() {
    let chunk = Chunk::new("Loose text.".to_string(), collection(), None, 0);

    let context = format_context(&[SearchResult::new(chunk, 1.0)]);

    assert_eq!(context, "Source: Page N/A\nContent: Loose text.");
}

#[test]
fn given_no_results_when_formatting_context_then_uses_placeholder() {
    assert_eq!(format_context(&[]), "No relevant documents found.");
}

#[tokio::test]
async fn given_template_when_generating_then_sends_rendered_prompt_and_returns_reply() {
    let llm = RecordingLlmClient::new("The appeal was allowed.");
    let generator = AnswerGenerator::new(llm.clone());
    let template = PromptTemplate::new(PromptKind::GeneralQa, "C: {context}\nQ: {question}");

    let answer = generator
        .generate("What was decided?", &[result("Appeal allowed.", 4, 0.8)], &template)
        .await
        .unwrap();

    assert_eq!(answer, "The appeal was allowed.");
    assert_eq!(
        llm.prompts(),
        vec!["C: Source: Page 4\nContent: Appeal allowed.\nQ: What was decided?"]
    );
}

#[tokio::test]
async fn given_failing_llm_when_generating_then_returns_completion_error() {
    let generator = AnswerGenerator::new(Arc::new(FailingLlmClient));
    let template = PromptTemplate::new(PromptKind::Direct, "{question}");

    let error = generator.generate("q", &[], &template).await.unwrap_err();

    assert!(matches!(error, GenerationError::Completion(_)));
}
