//! # ascend_api
//!
//! HTTP API library for Ascend: the form page, the field schema and the
//! streaming completion relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use ascend_core::completion::CompletionError;
use ascend_core::completion::openai::OpenAiChatClient;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, form, health, page};

/// Shared application state passed to all handlers.
///
/// Immutable after startup; each request works on its own clone.
#[derive(Clone, Debug)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Upstream chat-completion client.
    pub completion: OpenAiChatClient,
}

impl AppState {
    /// Build the state, constructing the completion client from `config`.
    pub fn new(config: ApiConfig) -> Result<Self, CompletionError> {
        let completion = OpenAiChatClient::new(config.completion.clone())?;
        Ok(Self { config, completion })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_INDEX, get(page::index_handler))
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::GET_API_FORM_SCHEMA, get(form::schema_handler))
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
