mod answer_generator;
mod document_validator;
mod ingestion_service;
mod prompt_selector;
mod qa_service;
pub mod retrieval;

pub use answer_generator::{AnswerGenerator, GenerationError, format_context};
pub use document_validator::{
    DocumentValidator, LEGAL_KEYWORDS, VALIDATION_PAGE_LIMIT, score_legal_text,
};
pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use prompt_selector::{PromptSelector, is_summarization_request};
pub use qa_service::{QaError, QaService};
pub use retrieval::{
    ChunkRetriever, MultiQueryRetriever, RetrievalError, RetrievalPipeline, RetrievalStrategy,
    VectorRetriever,
};
