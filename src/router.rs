//! Intent Router
//!
//! Classifies a query against the registry with one model completion, then
//! dispatches the original query to the first capability named in the reply.

use crate::capability::Registry;
use crate::error::{RouterError, RouterResult};
use crate::llm::LanguageModel;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default classification prompt. `{intents}` and `{query}` are substituted.
pub const DEFAULT_INTENT_TEMPLATE: &str = r#"现在有一些意图，类别为{intents}，你的任务是理解用户问题的意图，并判断该问题属于哪一类意图。
回复的意图类别必须在提供的类别中，并且必须按格式回复：“意图类别：<>”。

举例：
问题：今天的天气怎么样？
意图类别：搜索问答

问题：画一幅画，内容为山水鸟虫。
意图类别：绘画

问题：将下面的文字转成语音：<文本>
意图类别：语音

问题：“{query}”
"#;

pub struct IntentRouter {
    registry: Registry,
    model: Arc<dyn LanguageModel>,
    template: String,
}

impl IntentRouter {
    pub fn new(registry: Registry, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            registry,
            model,
            template: DEFAULT_INTENT_TEMPLATE.to_string(),
        }
    }

    /// Replace the classification prompt; it should contain `{intents}` and `{query}`
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn model(&self) -> &Arc<dyn LanguageModel> {
        &self.model
    }

    /// Render the classification prompt for `query`
    pub fn build_prompt(&self, query: &str) -> String {
        let intents = format!("[{}]", self.registry.list_names().join(", "));
        self.template
            .replace("{intents}", &intents)
            .replace("{query}", query)
    }

    /// Rank registered capabilities by where the model mentions them.
    ///
    /// An empty result means the model named nothing we know; that is not an
    /// error at this level.
    pub async fn classify(&self, query: &str) -> RouterResult<Vec<String>> {
        let prompt = self.build_prompt(query);
        let reply = self.model.complete(&prompt).await?;
        debug!("🧠 Classification reply from {}: {}", self.model.name(), reply);

        let selected = rank_mentions(&self.registry.list_names(), &reply);
        info!("🎯 Intent candidates: {:?}", selected);
        Ok(selected)
    }

    /// Classify `query` and hand it, unmodified, to the top-ranked capability
    pub async fn route(&self, query: &str) -> RouterResult<String> {
        let selected = self.classify(query).await?;
        let Some(name) = selected.first() else {
            warn!("❌ No capability matched: '{}'", query);
            return Err(RouterError::ClassificationFailure);
        };

        let capability = self.registry.get(name)?;
        info!("🚀 Dispatching to '{}'", capability.name());

        capability
            .invoke(query)
            .await
            .map_err(|source| RouterError::Handler {
                capability: name.clone(),
                source,
            })
    }
}

/// Names that occur verbatim in `reply`, ordered by first occurrence.
///
/// Equal positions keep the order of `names`.
pub fn rank_mentions(names: &[&str], reply: &str) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = names
        .iter()
        .filter_map(|name| reply.find(name).map(|pos| (pos, *name)))
        .collect();

    // stable sort keeps registration order for ties
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, name)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = ["搜索问答", "绘画", "语音"];

    #[test]
    fn single_mention() {
        assert_eq!(rank_mentions(&NAMES, "意图类别：搜索问答"), vec!["搜索问答"]);
    }

    #[test]
    fn no_mention_is_empty() {
        assert!(rank_mentions(&NAMES, "我不知道").is_empty());
        assert!(rank_mentions(&NAMES, "").is_empty());
    }

    #[test]
    fn ordered_by_first_occurrence() {
        let reply = "...你需要的是绘画...也可能是语音...";
        assert_eq!(rank_mentions(&NAMES, reply), vec!["绘画", "语音"]);

        let reply = "语音？不，应该是搜索问答。也许语音";
        assert_eq!(rank_mentions(&NAMES, reply), vec!["语音", "搜索问答"]);
    }

    #[test]
    fn ties_keep_registration_order() {
        // "draw" and "drawing" both start at index 0
        let names = ["drawing", "draw", "speech"];
        assert_eq!(rank_mentions(&names, "drawing please"), vec!["drawing", "draw"]);

        let names = ["draw", "drawing"];
        assert_eq!(rank_mentions(&names, "drawing please"), vec!["draw", "drawing"]);
    }

    #[test]
    fn repeated_mentions_count_once() {
        assert_eq!(rank_mentions(&NAMES, "绘画 绘画 绘画"), vec!["绘画"]);
    }
}
