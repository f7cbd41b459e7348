// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::io::Write;

use ascend_core::form::{self, PropertyForm};
use ascend_core::prompt::build_prompt;
use ascend_core::session::ChatSession;
use clap::Parser;
use cli::{Cli, Commands};
use client::RelayClient;
use futures_util::StreamExt;

mod cli;
mod client;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Generate { server, property } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(generate(&server, property.into()))?;
        }
        Commands::Prompt { property } => {
            let fields = form::validate(property.into()).inspect_err(report)?;
            print!("{}", build_prompt(&fields));
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Validate, submit and print the streamed description as it arrives.
async fn generate(server: &str, input: PropertyForm) -> Result<()> {
    let client = RelayClient::new(server)?;
    let mut session = ChatSession::new();

    let pending = form::submit(&mut session, input, |message| client.send(message))
        .inspect_err(report)?;
    let mut chunks = std::pin::pin!(pending.await?);

    session.begin_response();
    let mut stdout = std::io::stdout().lock();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        stdout.write_all(chunk.as_bytes())?;
        stdout.flush()?;
        session.push_chunk(&chunk);
    }
    session.finish();

    if session.displayed_text().is_none() {
        log::warn!("server returned an empty description");
    } else {
        writeln!(stdout)?;
    }
    Ok(())
}

fn report(errors: &form::ValidationErrors) {
    for e in &errors.errors {
        log::error!("{}: {}", e.field, e.message);
    }
}
