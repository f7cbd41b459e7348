//! Completion relay — turns a submitted field set into a streamed sales description.
//!
//! Single endpoint `POST /api/chat` that:
//! 1. Takes the last message of the request (earlier turns are ignored)
//! 2. Parses its content as a serialized property field set
//! 3. Builds the prompt and prepends the fixed system instruction
//! 4. Requests a streaming completion upstream
//! 5. Streams the text back as it arrives, without buffering

use std::task::Poll;

use ascend_core::completion::{ChatMessage, CompletionError, TextStream};
use ascend_core::form::PropertyFieldSet;
use ascend_core::prompt::{SYSTEM_PROMPT, build_prompt};
use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures_util::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Content type of the streamed completion body.
pub const STREAM_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Extract the field set from the last message of a chat request.
///
/// Fails before any network activity. A missing message is a client error;
/// content that is not a serialized field set is a server fault.
pub fn field_set_from_request(mut request: ChatRequest) -> AppResult<PropertyFieldSet> {
    let last = request
        .messages
        .pop()
        .ok_or_else(|| AppError::Validation("No messages provided".into()))?;

    PropertyFieldSet::from_transport(&last.content)
        .map_err(|e| AppError::MalformedInput(format!("Malformed property details: {e}")))
}

/// Log each delta on its way to the client, and the end of the completion.
fn relay(
    deltas: TextStream,
    property: String,
) -> impl Stream<Item = Result<String, CompletionError>> + Send + 'static {
    let done = stream::poll_fn(move |_| {
        debug!(property = %property, "completion finished");
        Poll::<Option<Result<String, CompletionError>>>::Ready(None)
    });
    deltas
        .inspect(|item| match item {
            Ok(text) => trace!(bytes = text.len(), "relaying chunk"),
            Err(e) => warn!(error = %e, "completion stream failed"),
        })
        .chain(done)
}

/// `POST /api/chat` — stream a sales description for the submitted property.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Response> {
    debug!(messages = request.messages.len(), "validating chat request");
    let fields = field_set_from_request(request)?;

    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(&fields)),
    ];

    debug!(property = %fields.property_name, model = state.completion.model(), "requesting completion");
    let deltas = state.completion.stream_chat(&messages).await?;

    info!(property = %fields.property_name, "streaming completion");
    let relayed = relay(deltas, fields.property_name);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, STREAM_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(relayed))
        .map_err(|e| AppError::Internal(format!("Response build failed: {e}")))
}
