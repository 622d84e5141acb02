//! Baidu general translation API client

use crate::config::TranslateConfig;
use anyhow::{anyhow, Context, Result};
use md5::{Digest, Md5};
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    trans_result: Vec<TranslatedSegment>,
    error_code: Option<String>,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslatedSegment {
    dst: String,
}

#[derive(Debug, Clone)]
pub struct BaiduTranslator {
    client: reqwest::Client,
    config: TranslateConfig,
}

impl BaiduTranslator {
    pub fn new(client: reqwest::Client, config: TranslateConfig) -> Self {
        Self { client, config }
    }

    /// Translate `text` from the configured source to the target language
    pub async fn translate(&self, text: &str) -> Result<String> {
        let salt = rand::thread_rng().gen_range(32768..=65536).to_string();
        let sign = sign(&self.config.app_id, text, &salt, &self.config.app_key);

        let resp: TranslateResponse = self
            .client
            .post(&self.config.url)
            .form(&[
                ("appid", self.config.app_id.as_str()),
                ("q", text),
                ("from", self.config.from.as_str()),
                ("to", self.config.to.as_str()),
                ("salt", salt.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await
            .context("translation request failed")?
            .error_for_status()
            .context("translation service returned an error")?
            .json()
            .await
            .context("malformed translation response")?;

        if let Some(code) = resp.error_code {
            return Err(anyhow!(
                "translation error {}: {}",
                code,
                resp.error_msg.unwrap_or_default()
            ));
        }

        let translated = resp
            .trans_result
            .into_iter()
            .next()
            .map(|seg| seg.dst)
            .ok_or_else(|| anyhow!("translation response has no result"))?;

        debug!("🌐 Translated '{}' -> '{}'", text, translated);
        Ok(translated)
    }
}

/// Request signature: md5(appid + q + salt + appkey), lowercase hex
fn sign(app_id: &str, text: &str, salt: &str, app_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(app_id.as_bytes());
    hasher.update(text.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(app_key.as_bytes());
    hex::encode(hasher.finalize())
}
