//! Smart Energy Chat Assistant
//!
//! Answers free-text questions through an optional Gemini completion
//! provider. When no provider is configured, or a call fails, a keyword
//! responder answers instead.

mod provider;
mod responder;
mod rules;

pub use provider::{ChatConfig, CompletionProvider, GeminiProvider, ProviderHandle};
pub use responder::{ChatReply, ChatResponder, PoweredBy};
pub use rules::{Intent, RuleBasedResponder};

use thiserror::Error;

/// Errors from the completion provider
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP client error: {0}")]
    Client(String),
    #[error("Provider request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Client(err.to_string())
    }
}
