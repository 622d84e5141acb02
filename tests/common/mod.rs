#![allow(dead_code)]

pub mod mock_capability;
pub mod mock_model;

use intent_agent::{Capability, IntentRouter, Registry};
use mock_capability::MockCapability;
use mock_model::MockModel;
use std::sync::Arc;

pub struct TestContext {
    pub router: IntentRouter,
    pub model: Arc<MockModel>,
    pub qa: Arc<MockCapability>,
    pub draw: Arc<MockCapability>,
    pub speech: Arc<MockCapability>,
}

impl TestContext {
    /// Router over 搜索问答 / 绘画 / 语音 mocks with a scripted model
    pub fn new(model: MockModel) -> Self {
        Self::with_capabilities(
            model,
            MockCapability::new("搜索问答", "登幽州台歌的作者是陈子昂。"),
            MockCapability::new("绘画", "图片保存在output/images下"),
            MockCapability::new("语音", "语音保存在output/audios下"),
        )
    }

    pub fn with_capabilities(
        model: MockModel,
        qa: MockCapability,
        draw: MockCapability,
        speech: MockCapability,
    ) -> Self {
        let model = Arc::new(model);
        let qa = Arc::new(qa);
        let draw = Arc::new(draw);
        let speech = Arc::new(speech);

        let registry = Registry::new(vec![
            qa.clone() as Arc<dyn Capability>,
            draw.clone() as Arc<dyn Capability>,
            speech.clone() as Arc<dyn Capability>,
        ])
        .expect("Failed to build registry");

        let router = IntentRouter::new(registry, model.clone());
        Self {
            router,
            model,
            qa,
            draw,
            speech,
        }
    }

    /// Total handler invocations across all capabilities
    pub fn total_invocations(&self) -> usize {
        self.qa.get_received().len()
            + self.draw.get_received().len()
            + self.speech.get_received().len()
    }
}
