use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_transformers::models::xlm_roberta::{
    Config as XlmRobertaConfig, XLMRobertaForSequenceClassification,
};
use tokenizers::Tokenizer;

use crate::application::ports::{Reranker, RerankerError};
use crate::domain::{Chunk, SearchResult};
use crate::infrastructure::llm::hub_model::HubModel;

/// Joint (query, passage) relevance scoring with an XLM-RoBERTa cross-encoder
/// such as `BAAI/bge-reranker-base`. Scores are sigmoid probabilities.
pub struct CrossEncoderReranker {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    pad_token_id: u32,
}

fn inference(e: candle_core::Error) -> RerankerError {
    RerankerError::InferenceFailed(e.to_string())
}

impl CrossEncoderReranker {
    pub fn new(model_id: &str, max_length: usize) -> Result<Self, RerankerError> {
        let device = Device::Cpu;
        tracing::info!(model = model_id, max_length, "Initializing cross-encoder reranker");

        let HubModel {
            config,
            tokenizer,
            weights,
        } = HubModel::<XlmRobertaConfig>::fetch(model_id, &device, |c| {
            max_length.min(c.max_position_embeddings.saturating_sub(2))
        })
        .map_err(|e| RerankerError::ModelLoadFailed(e.to_string()))?;

        let model = XLMRobertaForSequenceClassification::new(1, &config, weights)
            .map_err(|e| RerankerError::ModelLoadFailed(format!("model: {e}")))?;

        tracing::info!(model = model_id, "Cross-encoder reranker loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            pad_token_id: config.pad_token_id,
        })
    }

    fn logits(&self, query: &str, chunks: &[Chunk]) -> Result<Vec<f32>, RerankerError> {
        let pairs: Vec<(&str, &str)> = chunks.iter().map(|c| (query, c.text.as_str())).collect();
        let encodings = self
            .tokenizer
            .encode_batch(pairs, true)
            .map_err(|e| RerankerError::InferenceFailed(format!("tokenization: {e}")))?;

        let sequences: Vec<(&[u32], &[u32])> = encodings
            .iter()
            .map(|e| (e.get_ids(), e.get_attention_mask()))
            .collect();
        let PaddedBatch {
            input_ids,
            attention_mask,
            max_len,
        } = pad_batch(&sequences, self.pad_token_id);

        let shape = (chunks.len(), max_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device).map_err(inference)?;
        let attention_mask =
            Tensor::from_vec(attention_mask, shape, &self.device).map_err(inference)?;
        let token_type_ids = input_ids.zeros_like().map_err(inference)?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .and_then(|t| t.flatten_all())
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(inference)?;

        Ok(logits)
    }
}

/// Row-major `(rows, max_len)` token ids and attention mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBatch {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub max_len: usize,
}

/// Right-pads each `(ids, mask)` row to the longest one. Padding positions
/// carry `pad_id` and a zero mask.
pub fn pad_batch(sequences: &[(&[u32], &[u32])], pad_id: u32) -> PaddedBatch {
    let max_len = sequences.iter().map(|(ids, _)| ids.len()).max().unwrap_or(0);
    let mut input_ids = Vec::with_capacity(sequences.len() * max_len);
    let mut attention_mask = Vec::with_capacity(sequences.len() * max_len);

    for (ids, mask) in sequences {
        let pad_len = max_len - ids.len();
        input_ids.extend_from_slice(ids);
        input_ids.extend(std::iter::repeat_n(pad_id, pad_len));
        attention_mask.extend_from_slice(mask);
        attention_mask.extend(std::iter::repeat_n(0u32, pad_len));
    }

    PaddedBatch {
        input_ids,
        attention_mask,
        max_len,
    }
}

/// Pairs chunks with their raw logits, squashed to `(0, 1)` by a sigmoid.
/// Input order is kept.
pub fn scores_from_logits(
    chunks: Vec<Chunk>,
    logits: Vec<f32>,
) -> Result<Vec<SearchResult>, RerankerError> {
    if logits.len() != chunks.len() {
        return Err(RerankerError::InferenceFailed(format!(
            "expected {} scores, got {}",
            chunks.len(),
            logits.len()
        )));
    }

    Ok(chunks
        .into_iter()
        .zip(logits)
        .map(|(chunk, logit)| SearchResult::new(chunk, 1.0 / (1.0 + (-logit).exp())))
        .collect())
}

#[async_trait]
impl Reranker for CrossEncoderReranker {
    #[tracing::instrument(skip(self, query, chunks), fields(candidates = chunks.len()))]
    async fn score(
        &self,
        query: &str,
        chunks: Vec<Chunk>,
    ) -> Result<Vec<SearchResult>, RerankerError> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let logits = self.logits(query, &chunks)?;
        scores_from_logits(chunks, logits)
    }
}
