//! Intent Agent Error Types
//!
//! Centralized error handling for routing and dispatch.

use crate::llm::LlmError;
use thiserror::Error;

/// Central error type for the router and its collaborators
#[derive(Error, Debug)]
pub enum RouterError {
    /// The model answered, but its reply named no registered capability
    #[error("no capability matched the query")]
    ClassificationFailure,

    #[error("capability not found: {0}")]
    NotFound(String),

    #[error("capability '{capability}' failed: {source}")]
    Handler {
        capability: String,
        #[source]
        source: anyhow::Error,
    },

    /// The model call itself failed, so classification never completed
    #[error("language model unavailable: {0}")]
    UpstreamUnavailable(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for router operations
pub type RouterResult<T> = Result<T, RouterError>;
