//! Tools Module
//!
//! Built-in capabilities backed by remote HTTP services:
//! - 搜索问答: web search + grounded question answering
//! - 绘画: translated prompt → Stable Diffusion txt2img
//! - 语音: `<...>`-delimited text → speech synthesis service

use crate::capability::{Capability, Registry};
use crate::config::Config;
use crate::error::RouterResult;
use crate::llm::LanguageModel;
use std::sync::Arc;
use tracing::info;

pub mod draw;
pub mod search;
pub mod speech;
pub mod translate;

pub use draw::DrawTool;
pub use search::SearchTool;
pub use speech::SpeechTool;
pub use translate::BaiduTranslator;

/// Factory to create the default registry from config
pub fn create_registry(
    config: &Config,
    client: reqwest::Client,
    model: Arc<dyn LanguageModel>,
) -> RouterResult<Registry> {
    info!("🛠️ Creating tools (LLM: {})", model.name());
    let translator = BaiduTranslator::new(client.clone(), config.translate.clone());

    let tools: Vec<Arc<dyn Capability>> = vec![
        Arc::new(SearchTool::new(client.clone(), config.search.clone(), model)),
        Arc::new(DrawTool::new(client.clone(), config.draw.clone(), translator)),
        Arc::new(SpeechTool::new(client, config.speech.clone())),
    ];
    Registry::new(tools)
}
