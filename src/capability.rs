//! Capability Registry
//!
//! Named, independently invocable tools the router can choose between.
//!
//! Capability names double as classification tokens: the router looks for
//! them verbatim inside the model's reply. Pick names where no name is a
//! substring of another, otherwise the shorter one also matches wherever the
//! longer one appears.

use crate::error::{RouterError, RouterResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for tools the router can dispatch to
#[async_trait]
pub trait Capability: Send + Sync + std::fmt::Debug {
    /// Label shown to the model and matched in its reply
    fn name(&self) -> &str;

    /// Human-readable summary of what the tool does
    fn description(&self) -> &str;

    /// Handle the user's raw query
    async fn invoke(&self, query: &str) -> Result<String>;
}

/// Fixed, ordered set of capabilities
#[derive(Debug, Clone)]
pub struct Registry {
    capabilities: Vec<Arc<dyn Capability>>,
}

impl Registry {
    /// Build a registry, keeping registration order.
    ///
    /// Duplicate names are rejected. Names nested inside other names are
    /// accepted with a warning.
    pub fn new(capabilities: Vec<Arc<dyn Capability>>) -> RouterResult<Self> {
        for (i, cap) in capabilities.iter().enumerate() {
            let name = cap.name();
            if name.is_empty() {
                return Err(RouterError::Config("capability name is empty".to_string()));
            }
            for other in &capabilities[i + 1..] {
                if other.name() == name {
                    return Err(RouterError::Config(format!(
                        "duplicate capability name: {name}"
                    )));
                }
                if other.name().contains(name) || name.contains(other.name()) {
                    warn!(
                        "⚠️ Capability names '{}' and '{}' overlap; classification may be ambiguous",
                        name,
                        other.name()
                    );
                }
            }
        }

        info!(
            "🧰 Registered capabilities: {}",
            capabilities
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self { capabilities })
    }

    /// Capability names in registration order
    pub fn list_names(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    pub fn get(&self, name: &str) -> RouterResult<Arc<dyn Capability>> {
        self.capabilities
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .ok_or_else(|| RouterError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Capability>> {
        self.capabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
