use std::fmt;

const CONTEXT_PLACEHOLDER: &str = "{context}";
const QUESTION_PLACEHOLDER: &str = "{question}";

/// Which response format a prompt asks the model for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// A task template taken from the template registry.
    Registered(String),
    Summarization,
    GeneralQa,
    /// Question sent to the model without retrieved context.
    Direct,
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Registered(mode) => write!(f, "registered:{mode}"),
            PromptKind::Summarization => f.write_str("summarization"),
            PromptKind::GeneralQa => f.write_str("general_qa"),
            PromptKind::Direct => f.write_str("direct"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub kind: PromptKind,
    pub body: String,
}

impl PromptTemplate {
    pub fn new(kind: PromptKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Substitutes the context block and the question into the template body
    /// in a single left-to-right pass. Placeholder text that appears inside the
    /// substituted values is left as is.
    pub fn render(&self, context: &str, question: &str) -> String {
        let mut rendered =
            String::with_capacity(self.body.len() + context.len() + question.len());
        let mut rest = self.body.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(CONTEXT_PLACEHOLDER) {
                rendered.push_str(context);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(QUESTION_PLACEHOLDER) {
                rendered.push_str(question);
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }

        rendered.push_str(rest);
        rendered
    }
}
