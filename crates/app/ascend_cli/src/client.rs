//! HTTP client for the Ascend relay endpoint.

use ascend_core::completion::ChatMessage;
use futures_util::{Stream, StreamExt};
use url::Url;

use crate::{Error, Result};

/// Path of the relay endpoint on an Ascend server.
const CHAT_PATH: &str = "api/chat";

pub struct RelayClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RelayClient {
    pub fn new(server: &str) -> Result<Self> {
        let base = Url::parse(&format!("{}/", server.trim_end_matches('/')))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: base.join(CHAT_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one user message and return the streamed reply as text chunks.
    pub async fn send(&self, content: String) -> Result<impl Stream<Item = Result<String>>> {
        let endpoint = self.endpoint();
        log::debug!("POST {endpoint}");
        let body = serde_json::json!({ "messages": [ChatMessage::user(content)] });
        let response = self.http.post(endpoint.clone()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or(text);
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        let mut decoder = Utf8Decoder::default();
        Ok(response.bytes_stream().map(move |chunk| {
            let bytes = chunk?;
            Ok(decoder.push(&bytes))
        }))
    }
}

/// Decodes UTF-8 text split at arbitrary byte boundaries.
#[derive(Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Append `bytes` and return all text that is now complete.
    ///
    /// An incomplete trailing sequence is held until the next call; invalid
    /// bytes are replaced with U+FFFD.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let complete = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => self.pending.len(),
        };
        let rest = self.pending.split_off(complete);
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending = rest;
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_chat_path() {
        let client = RelayClient::new("http://127.0.0.1:3100").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:3100/api/chat");
        let client = RelayClient::new("https://ascend.example/app/").unwrap();
        assert_eq!(client.endpoint().as_str(), "https://ascend.example/app/api/chat");
    }

    #[test]
    fn rejects_invalid_server_url() {
        assert!(matches!(RelayClient::new("not a url"), Err(Error::Url(_))));
    }

    #[test]
    fn decoder_holds_split_characters() {
        let mut decoder = Utf8Decoder::default();
        let bytes = "café".as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() - 1);
        assert_eq!(decoder.push(head), "caf");
        assert_eq!(decoder.push(tail), "é");
    }

    #[test]
    fn decoder_replaces_invalid_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.push(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }
}
