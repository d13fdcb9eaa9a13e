mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::load_settings;
pub use settings::{
    ChunkingSettings, EmbeddingProvider, EmbeddingsSettings, LlmProvider, LlmSettings,
    LoggingSettings, PromptSettings, RerankerSettings, RetrievalSettings, ServerSettings,
    Settings, UploadSettings, VectorStoreProvider, VectorStoreSettings,
};
