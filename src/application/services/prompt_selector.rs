use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::application::ports::TemplateProvider;
use crate::domain::{PromptKind, PromptTemplate};

const GENERAL_QA_TEMPLATE: &str = "CONTEXT:\n{context}\n\n\
QUERY:\n{question}\n\n\
Based *only* on the provided CONTEXT, answer the QUERY. \
If the information is not found, state that. Be concise.\n\n\
Answer:";

const SUMMARIZATION_TEMPLATE: &str = "CONTEXT:\n{context}\n\n\
REQUEST:\n{question}\n\n\
Using *only* the provided CONTEXT, write a faithful summary that addresses the REQUEST. \
Cover the parties, the legal issues, the arguments and the outcome where the CONTEXT states them. \
Cite page numbers in brackets. Do not add facts that are not in the CONTEXT.\n\n\
Summary:";

const DIRECT_TEMPLATE: &str = "You are an AI assistant specialized in Indian Legal Law, based on your custom training.\n\
Answer the following question comprehensively and accurately, drawing upon your knowledge of Indian legal statutes, case law, and principles.\n\n\
Question: {question}\n\n\
Answer:";

static SUMMARIZATION_CUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(summari[sz](e|ed|es|ing|ations?)|summary|summaries|sum(s|med|ming)?\s+up|tl;dr|gist|overview)\b",
    )
    .unwrap()
});

/// Chooses the prompt template for a question.
///
/// Selection is a pure function of the question, the requested mode and the
/// template registry. Some template is always returned.
pub struct PromptSelector {
    registry: Arc<dyn TemplateProvider>,
}

impl PromptSelector {
    pub fn new(registry: Arc<dyn TemplateProvider>) -> Self {
        Self { registry }
    }

    pub fn select(&self, question: &str, mode: Option<&str>) -> PromptTemplate {
        if let Some(mode) = mode.map(str::trim).filter(|m| !m.is_empty()) {
            if let Some(entry) = self.registry.lookup(mode) {
                tracing::debug!(mode, "Using registered prompt mode");
                return PromptTemplate::new(
                    PromptKind::Registered(mode.to_string()),
                    registered_body(&entry.prompt_template),
                );
            }
            tracing::warn!(mode, "Unknown prompt mode, falling back to general Q&A");
            return Self::general_qa();
        }

        if is_summarization_request(question) {
            PromptTemplate::new(PromptKind::Summarization, SUMMARIZATION_TEMPLATE)
        } else {
            Self::general_qa()
        }
    }

    pub fn direct() -> PromptTemplate {
        PromptTemplate::new(PromptKind::Direct, DIRECT_TEMPLATE)
    }

    pub fn modes(&self) -> Vec<String> {
        self.registry.modes()
    }

    fn general_qa() -> PromptTemplate {
        PromptTemplate::new(PromptKind::GeneralQa, GENERAL_QA_TEMPLATE)
    }
}

fn registered_body(task: &str) -> String {
    format!(
        "CONTEXT:\n---\n{{context}}\n---\n\n\
         USER'S REQUEST:\n---\n{{question}}\n---\n\n\
         TASK:\n---\n{task}\n---"
    )
}

pub fn is_summarization_request(question: &str) -> bool {
    SUMMARIZATION_CUES.is_match(question)
}
