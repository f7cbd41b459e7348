//! Chat completion — wire types and the streaming upstream client.
//!
//! # Public API
//!
//! - [`ChatMessage`] — one `{ role, content }` entry of a chat request
//! - [`openai::OpenAiChatClient`] — streaming chat-completion client
//! - [`TextStream`] — incremental text deltas from the upstream service

pub mod openai;

use std::pin::Pin;

use futures_util::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used for every completion request.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Errors raised while requesting or reading a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upstream stream error: {0}")]
    Stream(String),

    #[error("Malformed completion chunk: {0}")]
    Chunk(#[from] serde_json::Error),
}

/// Incremental completion text, in arrival order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send>>;

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Connection settings for the upstream completion service.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer token for the upstream API.
    pub api_key: String,
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
}

impl CompletionConfig {
    /// Settings for the public OpenAI API with the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}
