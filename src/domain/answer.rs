use super::SearchResult;

/// One cited excerpt returned alongside a generated answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceExcerpt {
    pub content: String,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceExcerpt>,
}

impl Answer {
    pub fn without_sources(text: String) -> Self {
        Self {
            text,
            sources: Vec::new(),
        }
    }

    pub fn with_results(text: String, results: Vec<SearchResult>) -> Self {
        let sources = results
            .into_iter()
            .map(|r| SourceExcerpt {
                content: r.chunk.text,
                page: r.chunk.page,
            })
            .collect();
        Self { text, sources }
    }
}
