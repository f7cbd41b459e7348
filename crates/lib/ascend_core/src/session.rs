//! Per-client submission state.
//!
//! A [`ChatSession`] is owned by whoever drives a form (the CLI, a test, a
//! future UI) and passed explicitly into [`crate::form::submit`]. It holds the
//! outgoing conversation and the result panel being rendered.

use crate::completion::ChatMessage;

/// What the result panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultPanel {
    /// Nothing submitted yet, or cleared for a new submission.
    #[default]
    Empty,
    /// A completion is arriving; holds the text received so far.
    Streaming(String),
    /// The completion finished.
    Complete(String),
}

/// Conversation and result state for one client.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    result: ResultPanel,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all messages and any displayed result.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.result = ResultPanel::Empty;
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Start showing a new response. Any previous result is discarded.
    pub fn begin_response(&mut self) {
        self.result = ResultPanel::Streaming(String::new());
    }

    /// Append a streamed chunk to the in-progress response.
    ///
    /// A chunk arriving while the panel is not streaming starts a new response.
    pub fn push_chunk(&mut self, chunk: &str) {
        match &mut self.result {
            ResultPanel::Streaming(text) => text.push_str(chunk),
            _ => self.result = ResultPanel::Streaming(chunk.to_string()),
        }
    }

    /// Mark the in-progress response as complete and record it as the
    /// assistant's reply.
    pub fn finish(&mut self) {
        if let ResultPanel::Streaming(text) = std::mem::take(&mut self.result) {
            self.messages.push(ChatMessage::assistant(text.clone()));
            self.result = ResultPanel::Complete(text);
        }
    }

    pub fn result(&self) -> &ResultPanel {
        &self.result
    }

    /// Text to render, or `None` when the panel should be hidden.
    pub fn displayed_text(&self) -> Option<&str> {
        match &self.result {
            ResultPanel::Empty => None,
            ResultPanel::Streaming(text) | ResultPanel::Complete(text) if text.is_empty() => None,
            ResultPanel::Streaming(text) | ResultPanel::Complete(text) => Some(text.as_str()),
        }
    }
}
