use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::{LlmProvider, LlmSettings};

const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";
const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1";

/// Non-streaming chat completion against Ollama or an OpenAI-compatible API.
pub struct ChatLlmClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: Option<usize>,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Value,
}

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<usize>,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<ChatMessage>,
}

impl ChatLlmClient {
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmClientError> {
        let base_url = match (settings.provider, settings.base_url.as_deref()) {
            (_, Some(url)) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            (LlmProvider::Ollama, _) => OLLAMA_DEFAULT_URL.to_string(),
            (LlmProvider::OpenAi, _) => OPENAI_DEFAULT_URL.to_string(),
            (LlmProvider::LmStudio, _) => {
                return Err(LlmClientError::InvalidConfiguration(
                    "base_url required for lmstudio provider".to_string(),
                ));
            }
        };

        let api_key = settings.api_key.clone().filter(|k| !k.is_empty());
        if settings.provider == LlmProvider::OpenAi && api_key.is_none() {
            return Err(LlmClientError::InvalidConfiguration(
                "api_key required for openai provider".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| LlmClientError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            provider: settings.provider,
            base_url,
            api_key,
            model: settings.chat_model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    fn user_message(prompt: &str) -> Vec<ChatMessage> {
        vec![ChatMessage {
            role: "user".to_string(),
            content: Value::String(prompt.to_string()),
        }]
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, LlmClientError> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        Ok(response)
    }

    async fn complete_ollama(&self, prompt: &str) -> Result<String, LlmClientError> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: Self::user_message(prompt),
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };
        let request = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body);

        let response: OllamaChatResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        Ok(coerce_content(response.message.as_ref().map(|m| &m.content)))
    }

    async fn complete_openai(&self, prompt: &str) -> Result<String, LlmClientError> {
        let body = OpenAiChatRequest {
            model: &self.model,
            messages: Self::user_message(prompt),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);

        let response: OpenAiChatResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?;
        Ok(coerce_content(Some(&choice.message.content)))
    }
}

/// Flattens a chat message `content` field into plain text.
///
/// Strings pass through, arrays of parts are concatenated (using each part's
/// `text` field when it is an object), and a missing or null value becomes
/// the empty string.
pub fn coerce_content(content: Option<&Value>) -> String {
    match content {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .map(|part| match part {
                Value::Object(fields) => coerce_content(fields.get("text")),
                other => coerce_content(Some(other)),
            })
            .collect(),
        Some(Value::Object(fields)) => match fields.get("text").or_else(|| fields.get("content")) {
            Some(inner) => coerce_content(Some(inner)),
            None => Value::Object(fields.clone()).to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl LlmClient for ChatLlmClient {
    #[tracing::instrument(skip(self, prompt), fields(provider = ?self.provider, model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Sending completion request");

        let answer = match self.provider {
            LlmProvider::Ollama => self.complete_ollama(prompt).await?,
            LlmProvider::OpenAi | LlmProvider::LmStudio => self.complete_openai(prompt).await?,
        };

        tracing::info!(answer_chars = answer.chars().count(), "Completion received");
        Ok(answer)
    }
}
