//! Language Model Module
//!
//! One contract, `complete(prompt) -> text`, shared by intent
//! classification and the question-answering tool.

use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub mod ollama;
pub mod openai;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("empty or missing content in response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::Decode(err.to_string())
        } else {
            LlmError::Request(err.to_string())
        }
    }
}

/// Trait for text completion backends
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Send `prompt` and return the model's text reply
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the backend name
    fn name(&self) -> &str;

    /// Whether the backend is reachable; backends without a status endpoint report healthy
    async fn health_check(&self) -> bool {
        true
    }
}

/// Factory to create the configured language model
pub fn create_model(
    config: &Config,
    client: reqwest::Client,
) -> Result<Arc<dyn LanguageModel>, LlmError> {
    let llm = &config.llm;
    info!("🛠️ Creating language model: {} ({})", llm.provider, llm.model);
    let model: Arc<dyn LanguageModel> = match llm.provider.to_lowercase().as_str() {
        "ollama" => Arc::new(ollama::OllamaModel::new(
            client,
            &llm.url,
            &llm.model,
            llm.temperature,
        )),
        "openai" | "openai-compatible" => Arc::new(openai::OpenAiCompatibleModel::new(
            client,
            &llm.url,
            &llm.model,
            llm.temperature,
            llm.api_key.clone(),
        )),
        other => return Err(LlmError::UnknownProvider(other.to_string())),
    };
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_rejected() {
        let mut config = Config::default();
        config.llm.provider = "chatglm".to_string();
        let err = create_model(&config, reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, LlmError::UnknownProvider(p) if p == "chatglm"));
    }

    #[test]
    fn known_providers_build() {
        let mut config = Config::default();
        for provider in ["ollama", "openai", "OpenAI-Compatible"] {
            config.llm.provider = provider.to_string();
            assert!(create_model(&config, reqwest::Client::new()).is_ok());
        }
    }
}
