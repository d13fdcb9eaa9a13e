use std::sync::Arc;

use lexcase::application::services::{PromptSelector, is_summarization_request};
use lexcase::domain::PromptKind;
use lexcase::infrastructure::prompts::JsonTemplateRegistry;

const REGISTRY: &str = r#"{
    "case_summary": {
        "description": "Summarise the case",
        "prompt_template": "Summarise the judgment in five bullet points."
    },
    "timeline": {
        "prompt_template": "List the events in date order."
    }
}"#;

fn selector() -> PromptSelector {
    PromptSelector::new(Arc::new(JsonTemplateRegistry::from_json(REGISTRY).unwrap()))
}

#[test]
fn given_registered_mode_when_selecting_then_wraps_task_with_context_and_request() {
    let template = selector().select("What happened?", Some("timeline"));

    assert_eq!(template.kind, PromptKind::Registered("timeline".to_string()));
    let rendered = template.render("CTX", "What happened?");
    assert!(rendered.contains("CONTEXT:\n---\nCTX\n---"));
    assert!(rendered.contains("USER'S REQUEST:\n---\nWhat happened?\n---"));
    assert!(rendered.contains("TASK:\n---\nList the events in date order.\n---"));
}

#[test]
fn given_mode_with_surrounding_whitespace_when_selecting_then_mode_is_trimmed() {
    let template = selector().select("q", Some("  case_summary "));

    assert_eq!(
        template.kind,
        PromptKind::Registered("case_summary".to_string())
    );
}

#[test]
fn given_unknown_mode_when_selecting_then_falls_back_to_general_qa() {
    let template = selector().select("Please summarize this", Some("haiku"));

    assert_eq!(template.kind, PromptKind::GeneralQa);
}

#[test]
fn given_registered_mode_and_summary_cue_when_selecting_then_mode_wins() {
    let template = selector().select("Give me a summary", Some("timeline"));

    assert_eq!(template.kind, PromptKind::Registered("timeline".to_string()));
}

#[test]
fn given_empty_mode_and_summary_cue_when_selecting_then_uses_summarization() {
    let template = selector().select("Can you summarise the order?", Some("   "));

    assert_eq!(template.kind, PromptKind::Summarization);
}

#[test]
fn given_plain_question_when_selecting_then_uses_general_qa() {
    let template = selector().select("Who is the appellant?", None);

    assert_eq!(template.kind, PromptKind::GeneralQa);
    let rendered = template.render("CTX", "Who is the appellant?");
    assert!(rendered.contains("CTX"));
    assert!(rendered.contains("Who is the appellant?"));
}

#[test]
fn given_summary_cues_when_checking_then_detected_case_insensitively() {
    for question in [
        "Summarize the judgment",
        "please SUMMARISE it",
        "What is the gist?",
        "tl;dr of the order",
        "Give an overview of the facts",
        "Can you sum up the arguments?",
        "Can I get this judgment summarized?",
        "Summarizing the order, what was held?",
        "Give a summarised account of the facts",
        "Summaries of both appeals, please",
    ] {
        assert!(is_summarization_request(question), "{question}");
    }
}

#[test]
fn given_inflected_summary_request_without_mode_when_selecting_then_uses_summarization() {
    let template = selector().select("Can I get this judgment summarized?", None);

    assert_eq!(template.kind, PromptKind::Summarization);
}

#[test]
fn given_cue_inside_longer_word_when_checking_then_not_detected() {
    assert!(!is_summarization_request("Which overviewer signed the order?"));
    assert!(!is_summarization_request("Who is the respondent?"));
}

#[test]
fn given_registry_when_listing_modes_then_sorted_names() {
    assert_eq!(selector().modes(), vec!["case_summary", "timeline"]);
}

#[test]
fn given_direct_template_when_rendering_then_contains_question_only() {
    let rendered = PromptSelector::direct().render("ignored context", "What is bail?");

    assert_eq!(PromptSelector::direct().kind, PromptKind::Direct);
    assert!(rendered.contains("Question: What is bail?"));
    assert!(!rendered.contains("ignored context"));
}
