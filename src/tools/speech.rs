//! Text-to-speech tool
//!
//! The text to vocalize must be wrapped in angle brackets inside the query,
//! e.g. `将这段话转成语音：<你好世界>`.

use crate::capability::Capability;
use crate::config::SpeechConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

lazy_static! {
    static ref DELIMITED: Regex = Regex::new(r"<.+>").expect("valid speech delimiter regex");
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    result: String,
}

/// Extract the text between the first `<` and the last `>` on the same line
pub fn extract_speech_text(query: &str) -> Option<&str> {
    DELIMITED
        .find(query)
        .map(|m| &query[m.start() + 1..m.end() - 1])
}

#[derive(Debug)]
pub struct SpeechTool {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl SpeechTool {
    pub fn new(client: reqwest::Client, config: SpeechConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Capability for SpeechTool {
    fn name(&self) -> &str {
        "语音"
    }

    fn description(&self) -> &str {
        "根据用户的输入描述，将一定格式下的文本内容转成语音"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let text = extract_speech_text(query)
            .ok_or_else(|| anyhow!("转语音的文本要按格式输入，用<>括起来！"))?;

        let save_path = std::path::absolute(&self.config.output_dir)
            .with_context(|| format!("invalid output dir {}", self.config.output_dir))?;
        let save_path = save_path.to_string_lossy().into_owned();
        info!("📢 Synthesizing speech: '{}'", text);

        let resp: SpeechResponse = self
            .client
            .post(&self.config.url)
            .form(&[("text", text), ("save_path", save_path.as_str())])
            .send()
            .await
            .context("speech request failed")?
            .error_for_status()
            .context("speech service returned an error")?
            .json()
            .await
            .context("malformed speech response")?;

        Ok(format!("语音保存在{}下", resp.result))
    }
}
