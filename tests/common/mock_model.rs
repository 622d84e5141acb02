//! Mock Language Model for Testing
//!
//! Replies with scripted text and records every prompt it receives.

use async_trait::async_trait;
use intent_agent::llm::{LanguageModel, LlmError};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct MockModel {
    /// Replies returned in order; the last one repeats
    replies: Vec<String>,
    /// All prompts received
    pub prompts: Arc<Mutex<Vec<String>>>,
    /// Simulate an unreachable model
    pub should_fail: bool,
}

impl MockModel {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::replying(&[])
        }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if self.should_fail {
            return Err(LlmError::Request("connection refused".to_string()));
        }
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        let idx = (prompts.len() - 1).min(self.replies.len().saturating_sub(1));
        Ok(self.replies.get(idx).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
