use serde::Serialize;

/// Outcome of the legal-keyword gate applied before ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub confidence: f32,
    pub keywords_matched: usize,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationReport {
    pub fn no_text() -> Self {
        Self {
            is_valid: false,
            confidence: 0.0,
            keywords_matched: 0,
            matched_keywords: Vec::new(),
            reason: Some("Document contains no extractable text.".to_string()),
        }
    }
}
