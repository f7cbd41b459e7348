//! Ascend HTTP server binary.
//!
//! Serves the property form page and relays completions from the upstream
//! chat-completion API.

use ascend_api::AppState;
use ascend_api::config::ApiConfig;
use ascend_core::completion::{CompletionConfig, DEFAULT_BASE_URL};
use clap::Parser;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "ascend_server", about = "Ascend property description server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3100)]
    port: u16,

    /// API key for the upstream chat-completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    openai_base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ascend_api=debug,ascend_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let completion =
        CompletionConfig::new(args.openai_api_key).with_base_url(args.openai_base_url);
    let config = ApiConfig::new(format!("{}:{}", args.host, args.port), completion);

    info!(
        bind_addr = %config.bind_addr,
        upstream = %config.completion.base_url,
        model = %config.completion.model,
        "starting ascend_server"
    );

    let state = AppState::new(config.clone())?;
    let app = ascend_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
