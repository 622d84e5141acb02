//! OpenAI-compatible chat completion backend (`/chat/completions`).
//!
//! Wire types stay private to this module; callers only see text.

use super::{LanguageModel, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Adapter for any endpoint implementing `/chat/completions`
/// (OpenAI, vLLM, LM Studio, Ollama's OpenAI shim...).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiCompatibleModel {
    /// `api_key` is `None` for keyless local servers. When present it is sent
    /// as `Authorization: Bearer <key>`.
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        model: &str,
        temperature: f32,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
            api_key,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatibleModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let mut req = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %self.base_url, error = %e, "completion request failed (transport)");
            LlmError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(env) => env.error.message,
                Err(_) => body,
            };
            error!(%status, %message, "completion request returned HTTP error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        debug!(choices = parsed.choices.len(), "received completion");

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn complete_sends_bearer_and_trims_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  意图类别：语音\n")))
            .mount(&server)
            .await;

        let model = OpenAiCompatibleModel::new(
            reqwest::Client::new(),
            &format!("{}/v1/", server.uri()),
            "gpt-4o-mini",
            0.0,
            Some("sk-test".to_string()),
        );
        assert_eq!(model.complete("prompt").await.unwrap(), "意图类别：语音");
    }

    #[tokio::test]
    async fn error_envelope_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit reached", "type": "requests", "code": "rate_limit" }
            })))
            .mount(&server)
            .await;

        let model =
            OpenAiCompatibleModel::new(reqwest::Client::new(), &server.uri(), "m", 0.0, None);
        match model.complete("prompt").await.unwrap_err() {
            LlmError::Status { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn blank_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
            .mount(&server)
            .await;

        let model =
            OpenAiCompatibleModel::new(reqwest::Client::new(), &server.uri(), "m", 0.0, None);
        assert!(matches!(
            model.complete("prompt").await.unwrap_err(),
            LlmError::EmptyResponse
        ));
    }

    #[tokio::test]
    async fn non_json_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let model =
            OpenAiCompatibleModel::new(reqwest::Client::new(), &server.uri(), "m", 0.0, None);
        assert!(matches!(
            model.complete("prompt").await.unwrap_err(),
            LlmError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        let model =
            OpenAiCompatibleModel::new(reqwest::Client::new(), "http://127.0.0.1:9", "m", 0.0, None);
        assert!(matches!(
            model.complete("prompt").await.unwrap_err(),
            LlmError::Request(_)
        ));
        // no status endpoint, so it never claims to be down
        assert!(model.health_check().await);
    }
}
