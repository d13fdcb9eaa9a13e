use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::{Document, ValidationReport};

/// Pages read from the start of a document when deciding whether it is legal.
pub const VALIDATION_PAGE_LIMIT: usize = 3;

const VALID_THRESHOLD_HITS: usize = 3;
const CONFIDENCE_THRESHOLD_HITS: usize = 5;

/// Phrases whose presence marks a court filing or judgment.
pub const LEGAL_KEYWORDS: &[&str] = &[
    "in the high court of",
    "supreme court of india",
    "district court",
    "metropolitan magistrate",
    "civil judge",
    "case no",
    "case number",
    "application no",
    "petitioner",
    "respondent",
    "appellant",
    "defendant",
    "plaintiff",
    "judgment",
    "order",
    "coram",
    "hon'ble",
    "honourable",
    "learned counsel",
    "advocate for the petitioner",
    "advocate for the respondent",
    "section",
    "article",
    "under section",
    "the indian penal code",
    "code of civil procedure",
    "the constitution of india",
    "fir no",
];

/// Scores raw text against [`LEGAL_KEYWORDS`].
///
/// Matching is a case-insensitive substring test and every keyword counts at
/// most once, however often it occurs.
pub fn score_legal_text(text: &str) -> ValidationReport {
    if text.trim().is_empty() {
        return ValidationReport::no_text();
    }

    let lowered = text.to_lowercase();
    let matched_keywords: Vec<String> = LEGAL_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| (*keyword).to_string())
        .collect();

    let hits = matched_keywords.len();
    let confidence = (hits as f32 / CONFIDENCE_THRESHOLD_HITS as f32).min(1.0);
    let is_valid = hits >= VALID_THRESHOLD_HITS;

    let reason = (!is_valid).then(|| {
        format!(
            "Document matched {hits} legal keyword(s); at least {VALID_THRESHOLD_HITS} are required."
        )
    });

    ValidationReport {
        is_valid,
        confidence: (confidence * 100.0).round() / 100.0,
        keywords_matched: hits,
        matched_keywords,
        reason,
    }
}

/// Gatekeeper run on every upload before anything is embedded.
pub struct DocumentValidator {
    file_loader: Arc<dyn FileLoader>,
}

impl DocumentValidator {
    pub fn new(file_loader: Arc<dyn FileLoader>) -> Self {
        Self { file_loader }
    }

    /// Never fails: unreadable documents are reported as invalid.
    #[tracing::instrument(skip(self, data), fields(filename = %document.filename))]
    pub async fn validate(&self, data: &[u8], document: &Document) -> ValidationReport {
        let text = match self
            .file_loader
            .extract_pages(data, document, Some(VALIDATION_PAGE_LIMIT))
            .await
        {
            Ok(pages) => pages
                .into_iter()
                .take(VALIDATION_PAGE_LIMIT)
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                tracing::warn!(error = %e, "Text extraction for validation failed");
                String::new()
            }
        };

        let report = score_legal_text(&text);
        tracing::info!(
            is_valid = report.is_valid,
            confidence = report.confidence,
            keywords_matched = report.keywords_matched,
            "Document validated"
        );
        report
    }
}
