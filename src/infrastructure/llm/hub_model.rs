use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::de::DeserializeOwned;
use tokenizers::{Tokenizer, TruncationParams};

/// Files of a Hugging Face model repository, downloaded to the local cache and
/// ready to build a Candle model from.
pub(crate) struct HubModel<C> {
    pub config: C,
    pub tokenizer: Tokenizer,
    pub weights: VarBuilder<'static>,
}

#[derive(Debug, thiserror::Error)]
#[error("{stage}: {message}")]
pub(crate) struct HubModelError {
    stage: &'static str,
    message: String,
}

fn failed(stage: &'static str) -> impl FnOnce(String) -> HubModelError {
    move |message| HubModelError { stage, message }
}

impl<C: DeserializeOwned> HubModel<C> {
    /// Fetches `config.json`, `tokenizer.json` and `model.safetensors`.
    /// `max_length` is derived from the parsed config and caps tokenized input.
    pub fn fetch(
        model_id: &str,
        device: &Device,
        max_length: impl FnOnce(&C) -> usize,
    ) -> Result<Self, HubModelError> {
        let api = Api::new().map_err(|e| failed("hub")(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let download = |file: &'static str| {
            repo.get(file).map_err(|e| failed(file)(e.to_string()))
        };

        let config_path = download("config.json")?;
        let tokenizer_path = download("tokenizer.json")?;
        let weights_path = download("model.safetensors")?;

        let raw_config = std::fs::read_to_string(&config_path)
            .map_err(|e| failed("read config")(e.to_string()))?;
        let config: C = serde_json::from_str(&raw_config)
            .map_err(|e| failed("parse config")(e.to_string()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| failed("tokenizer")(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_length(&config),
                ..Default::default()
            }))
            .map_err(|e| failed("truncation")(e.to_string()))?;

        // SAFETY: the safetensors file is memory-mapped read-only and stays in
        // the hub cache for the life of the process.
        let weights = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)
                .map_err(|e| failed("weights")(e.to_string()))?
        };

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }
}
