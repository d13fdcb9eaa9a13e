use lexcase::domain::{PromptKind, PromptTemplate};

#[test]
fn given_template_when_rendering_then_substitutes_both_placeholders() {
    let template = PromptTemplate::new(PromptKind::GeneralQa, "C={context} Q={question}");
    assert_eq!(template.render("ctx", "why?"), "C=ctx Q=why?");
}

#[test]
fn given_context_containing_placeholder_when_rendering_then_it_is_not_expanded() {
    let template = PromptTemplate::new(PromptKind::GeneralQa, "{context}|{question}");
    assert_eq!(
        template.render("see {question}", "q"),
        "see {question}|q"
    );
}

#[test]
fn given_unrelated_braces_when_rendering_then_they_are_kept() {
    let template = PromptTemplate::new(PromptKind::Direct, "{\"a\": 1} {question} {other}");
    assert_eq!(template.render("", "x"), "{\"a\": 1} x {other}");
}

#[test]
fn given_prompt_kinds_when_displayed_then_use_snake_case_names() {
    assert_eq!(PromptKind::Summarization.to_string(), "summarization");
    assert_eq!(PromptKind::GeneralQa.to_string(), "general_qa");
    assert_eq!(
        PromptKind::Registered("timeline".to_string()).to_string(),
        "registered:timeline"
    );
}
