use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;
use crate::infrastructure::llm::hub_model::HubModel;

/// How token states are reduced to one sentence vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pooling {
    /// First token state, as the BGE models are trained.
    #[default]
    Cls,
    /// Attention-masked mean over all token states.
    Mean,
}

/// BERT-family sentence embeddings computed on the CPU with Candle.
pub struct LocalCandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_id: String,
    pooling: Pooling,
}

fn inference(e: candle_core::Error) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str, pooling: Pooling) -> Result<Self, EmbedderError> {
        let device = Device::Cpu;

        tracing::info!(
            model = model_id,
            pooling = ?pooling,
            "Initializing local Candle embedding model"
        );

        let HubModel {
            config,
            tokenizer,
            weights,
        } = HubModel::<BertConfig>::fetch(model_id, &device, |c| c.max_position_embeddings)
            .map_err(|e| EmbedderError::ModelLoadFailed(e.to_string()))?;

        let model = BertModel::load(weights, &config)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("model: {e}")))?;

        tracing::info!(model = model_id, "Local Candle embedding model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            model_id: model_id.to_string(),
            pooling,
        })
    }

    fn encode_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedderError::InferenceFailed(format!("tokenization: {e}")))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut all_input_ids = Vec::with_capacity(texts.len() * max_len);
        let mut all_type_ids = Vec::with_capacity(texts.len() * max_len);
        let mut all_attention_mask = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let pad_len = max_len - ids.len();

            all_input_ids.extend_from_slice(ids);
            all_input_ids.extend(std::iter::repeat_n(0u32, pad_len));

            all_type_ids.extend_from_slice(encoding.get_type_ids());
            all_type_ids.extend(std::iter::repeat_n(0u32, pad_len));

            all_attention_mask.extend_from_slice(encoding.get_attention_mask());
            all_attention_mask.extend(std::iter::repeat_n(0u32, pad_len));
        }

        let batch_size = texts.len();
        let input_ids =
            Tensor::from_vec(all_input_ids, (batch_size, max_len), &self.device).map_err(inference)?;
        let token_type_ids =
            Tensor::from_vec(all_type_ids, (batch_size, max_len), &self.device).map_err(inference)?;
        let attention_mask = Tensor::from_vec(all_attention_mask, (batch_size, max_len), &self.device)
            .map_err(inference)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(inference)?;

        let pooled = match self.pooling {
            Pooling::Cls => hidden.narrow(1, 0, 1).and_then(|t| t.squeeze(1)),
            Pooling::Mean => mean_pool(&hidden, &attention_mask),
        }
        .map_err(inference)?;

        let vectors: Vec<Vec<f32>> = pooled.to_vec2().map_err(inference)?;
        Ok(vectors.into_iter().map(Embedding::normalized).collect())
    }
}

fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = attention_mask.to_dtype(DType::F32)?;
    let summed = hidden.broadcast_mul(&mask.unsqueeze(2)?)?.sum(1)?;
    let counts = mask.sum(1)?.unsqueeze(1)?;
    summed.broadcast_div(&counts)
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode_texts(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    #[tracing::instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.encode_texts(texts)
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}
