pub mod llm;
pub mod observability;
pub mod persistence;
pub mod prompts;
pub mod text_processing;
