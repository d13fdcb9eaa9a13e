mod chat_client;
mod cross_encoder_reranker;
mod embedder;
mod hub_model;

pub use chat_client::{ChatLlmClient, coerce_content};
pub use cross_encoder_reranker::{
    CrossEncoderReranker, PaddedBatch, pad_batch, scores_from_logits,
};
pub use embedder::{
    EmbedderFactory, EmbedderFactoryError, LocalCandleEmbedder, OpenAiEmbedder, Pooling,
};
