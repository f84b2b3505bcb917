// Main greeting application implementation.

use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::controller::GreetingController;
use crate::http::{Controller, HttpServer, Server};
use crate::shutdown::GracefulShutdown;

/// Encapsulates the greeting service state.
pub struct App {
    cfg: Config,
    shutdown_token: CancellationToken,
    server: Arc<dyn Server>,
}

impl App {
    /// Creates a new application instance with an injected configuration.
    pub fn new(shutdown_token: CancellationToken, cfg: Config) -> Result<Self> {
        let server: Arc<dyn Server> =
            HttpServer::new(shutdown_token.clone(), cfg, Self::controllers())?;

        Ok(Self {
            cfg,
            shutdown_token,
            server,
        })
    }

    /// Starts the listener as an independent task so the caller stays free
    /// to block on the termination signal. Returns the task handle; its
    /// result is the listener outcome (a bind failure shows up here).
    pub fn serve(&self, gsh: Arc<GracefulShutdown>) -> tokio::task::JoinHandle<Result<()>> {
        let server = self.server.clone();
        let shutdown_token = self.shutdown_token.clone();

        let handle = tokio::task::spawn(async move {
            let result = server.listen_and_serve().await;
            if let Err(ref e) = result {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
                // A dead listener takes the whole process down.
                shutdown_token.cancel();
            }
            gsh.done();
            result
        });

        info!(
            component = "app",
            event = "started",
            port = self.cfg.port(),
            "application lifecycle"
        );

        handle
    }

    /// Returns all HTTP controllers for the server.
    fn controllers() -> Vec<Box<dyn Controller>> {
        vec![
            // Fixed greeting for any method on any path
            Box::new(GreetingController::new()),
        ]
    }
}
