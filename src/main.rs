// Main entrypoint for the hellod demo service.

mod app;
mod config;
mod controller;
mod http;
mod shutdown;

use crate::config::Config;
use crate::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tokio_util::sync::CancellationToken;

/// hellod - Minimal greeting HTTP service, the supervised demo workload
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

/// Configures structured logging; `RUST_LOG` overrides the default level.
fn configure_logger() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    configure_logger();

    // Now start the async runtime
    tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    // Create cancellation token for graceful shutdown
    let shutdown_token = CancellationToken::new();

    // Resolve the listen port once; immutable from here on
    let cfg = Config::resolve(args.port)?;
    info!(
        component = "main",
        event = "config_resolved",
        port = cfg.port(),
        "listen port resolved"
    );

    // Setup graceful shutdown handler (10s drain deadline)
    let graceful_shutdown = Arc::new(GracefulShutdown::new(shutdown_token.clone()));
    graceful_shutdown.add(1);

    // Initialize the application and start the listener in a background task
    let app = app::App::new(shutdown_token, cfg)?;
    let serve_handle = app.serve(graceful_shutdown.clone());

    // Block on SIGINT (or listener failure via token cancellation), then
    // drain with the bounded deadline.
    if let Err(e) = graceful_shutdown.await_shutdown().await {
        if e.is::<shutdown::TimeoutError>() {
            // Expected best-effort behavior, not a failure
            warn!(
                component = "main",
                event = "drain_abandoned",
                "exiting with in-flight requests abandoned"
            );
            return Ok(());
        }
        return Err(e);
    }

    // A completed drain means the listener task has reported done and is
    // returning, so this await cannot block. Its result carries any failure
    // that stopped the listener on its own (typically a bind error).
    serve_handle.await.context("listener task panicked")??;

    Ok(())
}
