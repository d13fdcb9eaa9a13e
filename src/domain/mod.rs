mod answer;
mod chunk;
mod collection_id;
mod document;
mod embedding;
mod page_text;
mod prompt;
mod search_result;
mod validation_report;

pub use answer::{Answer, SourceExcerpt};
pub use chunk::{Chunk, ChunkId};
pub use collection_id::CollectionId;
pub use document::Document;
pub use embedding::Embedding;
pub use page_text::PageText;
pub use prompt::{PromptKind, PromptTemplate};
pub use search_result::SearchResult;
pub use validation_report::ValidationReport;
