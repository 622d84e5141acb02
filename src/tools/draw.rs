//! Drawing tool backed by a Stable Diffusion WebUI txt2img endpoint

use super::translate::BaiduTranslator;
use crate::capability::Capability;
use crate::config::DrawConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: String,
    steps: u32,
    width: u32,
    height: u32,
    negative_prompt: &'a str,
    sampler_index: &'a str,
    cfg_scale: f32,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Debug)]
pub struct DrawTool {
    client: reqwest::Client,
    config: DrawConfig,
    translator: BaiduTranslator,
}

impl DrawTool {
    pub fn new(client: reqwest::Client, config: DrawConfig, translator: BaiduTranslator) -> Self {
        Self {
            client,
            config,
            translator,
        }
    }

    /// Generate images for `query` and return the directory they were saved to
    pub async fn draw(&self, query: &str) -> Result<PathBuf> {
        let translated = self.translator.translate(query).await?;
        let payload = Txt2ImgRequest {
            prompt: format!("{}{}", translated, self.config.style_suffix),
            steps: self.config.steps,
            width: self.config.width,
            height: self.config.height,
            negative_prompt: &self.config.negative_prompt,
            sampler_index: &self.config.sampler,
            cfg_scale: self.config.cfg_scale,
        };
        debug!("🎨 txt2img prompt: {}", payload.prompt);

        let resp: Txt2ImgResponse = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .context("txt2img request failed")?
            .error_for_status()
            .context("txt2img backend returned an error")?
            .json()
            .await
            .context("malformed txt2img response")?;

        if resp.images.is_empty() {
            return Err(anyhow!("txt2img backend returned no images"));
        }

        let dir = PathBuf::from(&self.config.output_dir);
        save_images(&dir, &resp.images).await?;
        info!("🖼️ Saved {} image(s) to {}", resp.images.len(), dir.display());
        Ok(dir)
    }
}

/// Decode base64 images and write them as `output_{i}.png` under `dir`
async fn save_images(dir: &Path, images: &[String]) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    for (i, encoded) in images.iter().enumerate() {
        // WebUI may append ",<info>" after the payload
        let data = encoded.split(',').next().unwrap_or_default();
        let bytes = STANDARD
            .decode(data)
            .with_context(|| format!("image {i} is not valid base64"))?;
        tokio::fs::write(dir.join(format!("output_{i}.png")), bytes).await?;
    }
    Ok(())
}

#[async_trait]
impl Capability for DrawTool {
    fn name(&self) -> &str {
        "绘画"
    }

    fn description(&self) -> &str {
        "根据用户描述调用api画图"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let dir = self.draw(query).await?;
        Ok(format!("图片保存在{}下", dir.display()))
    }
}
