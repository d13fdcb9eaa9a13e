mod collection_config;
mod embedder;
mod file_loader;
mod llm_client;
mod reranker;
mod template_provider;
mod text_splitter;
mod vector_store;
mod vector_store_error;

pub use collection_config::CollectionConfig;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use reranker::{Reranker, RerankerError};
pub use template_provider::{TemplateEntry, TemplateProvider, TemplateRegistryError};
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
