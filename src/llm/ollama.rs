//! Ollama Integration
//!
//! Single-shot completions through Ollama's `/api/generate` endpoint.

use super::{LanguageModel, LlmError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Ollama API response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[derive(Debug, Clone)]
pub struct OllamaModel {
    client: reqwest::Client,
    url: String,
    model: String,
    temperature: f32,
}

impl OllamaModel {
    pub fn new(client: reqwest::Client, url: &str, model: &str, temperature: f32) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": self.temperature
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Ollama API Error ({}): {}", status, body_text);
            return Err(LlmError::Status {
                status: status.as_u16(),
                message: body_text,
            });
        }

        debug!("🧠 Ollama raw body: {}", body_text);

        let ollama_resp: OllamaResponse = serde_json::from_str(&body_text).map_err(|e| {
            warn!("❌ Failed to deserialize Ollama response: {} - Body: {}", e, body_text);
            LlmError::Decode(e.to_string())
        })?;

        Ok(ollama_resp.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }

    /// Health check - verify Ollama is reachable
    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/tags", self.url))
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
