//! Search-backed question answering
//!
//! Pulls the top Google Custom Search snippets for the query and asks the
//! language model to answer strictly from them.

use crate::capability::Capability;
use crate::config::SearchConfig;
use crate::llm::LanguageModel;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Context used when the search returns nothing
pub const NO_RESULTS: &str = "No Search Result was found";

/// Reply the model is told to give when the context cannot answer the question
pub const REFUSAL: &str = "抱歉，该问题需要更多上下文信息。";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug)]
pub struct SearchTool {
    client: reqwest::Client,
    config: SearchConfig,
    model: Arc<dyn LanguageModel>,
}

impl SearchTool {
    pub fn new(client: reqwest::Client, config: SearchConfig, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            client,
            config,
            model,
        }
    }

    /// Fetch search snippets for `query`, joined by blank lines
    pub async fn search_context(&self, query: &str) -> Result<String> {
        let resp: SearchResponse = self
            .client
            .get(&self.config.url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cse_id.as_str()),
                ("q", query),
                ("lr", self.config.language.as_str()),
            ])
            .send()
            .await
            .context("search request failed")?
            .error_for_status()
            .context("search service returned an error")?
            .json()
            .await
            .context("malformed search response")?;

        debug!("🔎 {} search items", resp.items.len());
        Ok(format_snippets(&resp.items, self.config.top_k))
    }

    fn qa_prompt(context: &str, query: &str) -> String {
        format!(
            "请根据下面带```分隔符的文本来回答问题。\n\
             如果该文本中没有相关内容可以回答问题，请直接回复：“{REFUSAL}”\n\
             ```{context}```\n\
             问题：{query}\n"
        )
    }
}

fn format_snippets(items: &[SearchItem], top_k: usize) -> String {
    let snippets: Vec<String> = items
        .iter()
        .take(top_k)
        .map(|item| {
            let mut text = String::new();
            if let Some(title) = &item.title {
                text.push_str(title);
                text.push('。');
            }
            if let Some(snippet) = &item.snippet {
                text.push_str(snippet);
            }
            text
        })
        .collect();

    if snippets.is_empty() {
        NO_RESULTS.to_string()
    } else {
        snippets.join("\n\n")
    }
}

#[async_trait]
impl Capability for SearchTool {
    fn name(&self) -> &str {
        "搜索问答"
    }

    fn description(&self) -> &str {
        "根据用户问题搜索最新的结果，并返回Json格式的结果"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        info!("🔎 Searching: '{}'", query);
        let context = self.search_context(query).await?;
        let answer = self
            .model
            .complete(&Self::qa_prompt(&context, query))
            .await
            .context("question answering failed")?;
        Ok(answer)
    }
}
