//! Mock Capability for Testing
//!
//! Records every query it is invoked with.

use anyhow::Result;
use async_trait::async_trait;
use intent_agent::Capability;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct MockCapability {
    name: String,
    reply: String,
    /// All queries received
    pub received: Arc<Mutex<Vec<String>>>,
    /// Fail every invocation
    pub should_fail: bool,
}

impl MockCapability {
    pub fn new(name: &str, reply: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: reply.to_string(),
            received: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            should_fail: true,
            ..Self::new(name, "")
        }
    }

    pub fn get_received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Capability for MockCapability {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "mock capability"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        self.received.lock().unwrap().push(query.to_string());
        if self.should_fail {
            return Err(anyhow::anyhow!("Mock {} failure", self.name));
        }
        Ok(self.reply.clone())
    }
}
