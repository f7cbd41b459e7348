//! API server configuration.

use ascend_core::completion::CompletionConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Upstream chat-completion settings.
    pub completion: CompletionConfig,
}

impl ApiConfig {
    pub fn new(bind_addr: impl Into<String>, completion: CompletionConfig) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            completion,
        }
    }
}
