//! OpenAI-compatible streaming chat-completion client.
//!
//! Sends `{ model, stream: true, messages }` to `{base_url}/chat/completions`
//! and decodes the server-sent-event body into text deltas. Requests are not
//! retried; any failure is returned to the caller as-is.

use std::future;

use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use sse_stream::{Sse, SseStream};
use tracing::{debug, warn};
use url::Url;

use super::{ChatMessage, CompletionConfig, CompletionError, TextStream};

/// Data payload marking the end of an OpenAI event stream.
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChunkError {
    #[serde(default)]
    message: String,
}

/// Streaming chat-completion client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: CompletionConfig,
    endpoint: Url,
}

impl OpenAiChatClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(
        client: reqwest::Client,
        config: CompletionConfig,
    ) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::Config("API key must not be empty".into()));
        }
        let endpoint = completions_url(&config.base_url)?;
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request a streaming completion for `messages`.
    ///
    /// Resolves once the upstream response headers arrive. A non-success
    /// status fails with [`CompletionError::Status`]; otherwise the returned
    /// stream yields text as the upstream produces it.
    pub async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<TextStream, CompletionError> {
        debug!(endpoint = %self.endpoint, model = %self.config.model, "requesting chat completion");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .json(&ChatCompletionRequest {
                model: &self.config.model,
                stream: true,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(status = status.as_u16(), "chat completion request rejected");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "chat completion stream opened");
        Ok(decode_events(SseStream::from_bytes_stream(
            response.bytes_stream(),
        )))
    }
}

/// Resolve `{base_url}/chat/completions`, tolerating a trailing slash.
fn completions_url(base_url: &str) -> Result<Url, CompletionError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|u| u.join("chat/completions"))
        .map_err(|e| CompletionError::Config(format!("Invalid base URL {base_url:?}: {e}")))
}

/// Turn an SSE event stream into completion text deltas.
///
/// Ends at the `[DONE]` event or when the upstream closes. Events without
/// content (role announcements, finish markers) are skipped.
pub fn decode_events<S>(events: S) -> TextStream
where
    S: Stream<Item = Result<Sse, sse_stream::Error>> + Send + 'static,
{
    events
        .take_while(|event| future::ready(!is_done(event)))
        .filter_map(|event| {
            future::ready(match event {
                Ok(sse) => parse_delta(&sse).transpose(),
                Err(e) => Some(Err(CompletionError::Stream(e.to_string()))),
            })
        })
        .boxed()
}

fn is_done(event: &Result<Sse, sse_stream::Error>) -> bool {
    matches!(event, Ok(sse) if sse.data.as_deref().map(str::trim) == Some(DONE_SENTINEL))
}

/// Extract the text delta carried by one SSE event, if any.
fn parse_delta(sse: &Sse) -> Result<Option<String>, CompletionError> {
    match sse.event.as_deref() {
        None | Some("message") => {}
        _ => return Ok(None),
    }
    let Some(data) = sse.data.as_deref() else {
        return Ok(None);
    };

    let chunk: ChatCompletionChunk = serde_json::from_str(data)?;
    if let Some(err) = chunk.error {
        return Err(CompletionError::Stream(err.message));
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn data(payload: &str) -> Result<Sse, sse_stream::Error> {
        Ok(Sse {
            event: None,
            data: Some(payload.to_string()),
            id: None,
            retry: None,
        })
    }

    fn delta(text: &str) -> Result<Sse, sse_stream::Error> {
        data(&serde_json::json!({ "choices": [{ "delta": { "content": text } }] }).to_string())
    }

    async fn collect(events: Vec<Result<Sse, sse_stream::Error>>) -> Vec<Result<String, CompletionError>> {
        decode_events(stream::iter(events)).collect().await
    }

    #[test]
    fn completions_url_appends_path() {
        let url = completions_url("https://api.openai.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let url = completions_url("http://127.0.0.1:9000/v1/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/v1/chat/completions");
    }

    #[test]
    fn completions_url_rejects_garbage() {
        assert!(matches!(
            completions_url("not a url"),
            Err(CompletionError::Config(_))
        ));
    }

    #[test]
    fn client_rejects_empty_key() {
        assert!(OpenAiChatClient::new(CompletionConfig::new("  ")).is_err());
        let client = OpenAiChatClient::new(CompletionConfig::new("sk-test")).unwrap();
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn request_body_enables_streaming() {
        let messages = [ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = serde_json::to_value(ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            stream: true,
            messages: &messages,
        })
        .unwrap();
        assert_eq!(body["stream"], true);
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
    }

    #[tokio::test]
    async fn yields_deltas_in_order() {
        let out = collect(vec![delta("Welcome "), delta("home"), data("[DONE]")]).await;
        let texts: Vec<String> = out.into_iter().map(Result::unwrap).collect();
        assert_eq!(texts, vec!["Welcome ", "home"]);
    }

    #[tokio::test]
    async fn done_sentinel_stops_stream() {
        let out = collect(vec![delta("a"), data("[DONE]"), delta("never")]).await;
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn skips_role_only_and_empty_chunks() {
        let role_only = data(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#);
        let finish = data(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#);
        let out = collect(vec![role_only, delta(""), delta("x"), finish]).await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_deref().unwrap(), "x");
    }

    #[tokio::test]
    async fn skips_non_message_events() {
        let ping = Ok(Sse {
            event: Some("ping".to_string()),
            data: Some("{}".to_string()),
            id: None,
            retry: None,
        });
        let out = collect(vec![ping, delta("x")]).await;
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn malformed_chunk_is_an_error() {
        let out = collect(vec![delta("ok"), data("{not json")]).await;
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1], Err(CompletionError::Chunk(_))));
    }

    #[tokio::test]
    async fn inline_error_payload_is_an_error() {
        let out = collect(vec![data(r#"{"error":{"message":"quota exceeded"}}"#)]).await;
        match &out[0] {
            Err(CompletionError::Stream(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
