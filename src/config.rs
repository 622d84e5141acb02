use crate::error::{RouterError, RouterResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub translate: TranslateConfig,
    pub draw: DrawConfig,
    pub speech: SpeechConfig,

    /// Timeout applied to every outbound HTTP request
    pub request_timeout_secs: u64,
    pub log_level: String,
}

/// Where a loaded config came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File,
    /// No file existed
    Defaults,
    /// The file could not be parsed and was moved to `backup`
    Recovered { backup: PathBuf, reason: String },
}

/// Language model used for classification and question answering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    pub url: String,
    pub model: String,
    pub temperature: f32,
    /// Only sent by the OpenAI-compatible provider
    pub api_key: Option<String>,
}

/// Google Custom Search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub url: String,
    pub api_key: String,
    pub cse_id: String,
    pub language: String,
    pub top_k: usize,
}

/// Baidu general translation API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub url: String,
    pub app_id: String,
    pub app_key: String,
    pub from: String,
    pub to: String,
}

/// Stable Diffusion txt2img backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub url: String,
    pub style_suffix: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub sampler: String,
    pub cfg_scale: f32,
    pub output_dir: String,
}

/// Text-to-speech backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub url: String,
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
            translate: TranslateConfig::default(),
            draw: DrawConfig::default(),
            speech: SpeechConfig::default(),
            request_timeout_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            url: "http://localhost:11434".to_string(),
            model: "qwen2".to_string(),
            temperature: 0.1,
            api_key: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: String::new(),
            cse_id: String::new(),
            language: "lang_zh-CN".to_string(),
            top_k: 5,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            url: "http://api.fanyi.baidu.com/api/trans/vip/translate".to_string(),
            app_id: String::new(),
            app_key: String::new(),
            from: "zh".to_string(),
            to: "en".to_string(),
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7860/sdapi/v1/txt2img".to_string(),
            style_suffix: ",traditional chinese ink painting,peaceful".to_string(),
            negative_prompt: "(worst quality:2), (low quality:2), (normal quality:2), lowres, \
                              normal quality, skin spots, acnes, skin blemishes, age spot, glans, \
                              (watermark:2)"
                .to_string(),
            steps: 30,
            width: 640,
            height: 1024,
            sampler: "DPM++ SDE Karras".to_string(),
            cfg_scale: 3.5,
            output_dir: "output/images".to_string(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5876/TextToSpeech".to_string(),
            output_dir: "output/audios".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> RouterResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults when missing or corrupt.
    ///
    /// Secrets found in the environment override whatever the file holds.
    pub fn load_from(path: &Path) -> RouterResult<Self> {
        let (config, source) = Self::load_with_source(path)?;
        if let ConfigSource::Recovered { backup, reason } = &source {
            tracing::warn!(
                "⚠️ Config file corrupted or invalid, using defaults: {} (moved to {})",
                reason,
                backup.display()
            );
        }
        Ok(config)
    }

    /// Like [`Config::load_from`], but reports where the values came from
    /// instead of logging, for callers that load before logging is set up.
    pub fn load_with_source(path: &Path) -> RouterResult<(Self, ConfigSource)> {
        let (mut config, source) = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str(&content) {
                Ok(config) => (config, ConfigSource::File),
                Err(e) => {
                    let backup = path.with_extension("json.corrupt");
                    std::fs::rename(path, &backup)?;
                    let source = ConfigSource::Recovered {
                        backup,
                        reason: e.to_string(),
                    };
                    (Self::default(), source)
                }
            }
        } else {
            (Self::default(), ConfigSource::Defaults)
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok((config, source))
    }

    /// Save config to the default location
    pub fn save(&self) -> RouterResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> RouterResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = non_empty("INTENT_AGENT_LLM_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = non_empty("GOOGLE_API_KEY") {
            self.search.api_key = v;
        }
        if let Some(v) = non_empty("GOOGLE_CSE_ID") {
            self.search.cse_id = v;
        }
        if let Some(v) = non_empty("BAIDU_APPID") {
            self.translate.app_id = v;
        }
        if let Some(v) = non_empty("BAIDU_APPKEY") {
            self.translate.app_key = v;
        }
    }

    /// Build the shared HTTP client honouring `request_timeout_secs`
    pub fn http_client(&self) -> RouterResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| RouterError::Config(format!("failed to build HTTP client: {e}")))
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("intent-agent")
        .join("config.json")
}
