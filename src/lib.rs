//! Intent Agent Library
//!
//! Routes a natural-language request to one of several tools by asking a
//! language model which tool applies, then dispatching the request to it.

pub mod capability;
pub mod config;
pub mod error;
pub mod llm;
pub mod router;
pub mod tools;

pub use capability::{Capability, Registry};
pub use error::{RouterError, RouterResult};
pub use llm::{LanguageModel, LlmError};
pub use router::IntentRouter;
