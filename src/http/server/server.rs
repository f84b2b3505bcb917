//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::controller::controller::Controller;

/// Server trait for HTTP server operations.
#[async_trait::async_trait]
pub trait Server: Send + Sync {
    /// Starts the server (blocking).
    async fn listen_and_serve(&self) -> Result<()>;
}

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Result<Arc<Self>> {
        let router = Self::build_router(controllers);

        Ok(Arc::new(Self {
            shutdown_token,
            addr: config.listen_addr(),
            router,
        }))
    }

    /// Starts the HTTP server and blocks until shutdown completes.
    ///
    /// A bind failure (typically the port already in use) is fatal and is
    /// returned with a message naming the address.
    pub async fn listen_and_serve(&self) -> Result<()> {
        info!(
            component = "server",
            event = "started",
            port = self.addr.port(),
            "listening on port: {}",
            self.addr.port()
        );

        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;

        // Stop accepting on cancellation, then drain in-flight requests.
        let shutdown_token = self.shutdown_token.clone();
        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                addr = %self.addr,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            addr = %self.addr,
            "server stopped"
        );

        Ok(())
    }

    /// Builds the router with all controllers.
    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        let mut router = Router::new();

        for controller in controllers {
            router = controller.add_route(router);
        }

        router
    }
}

#[async_trait::async_trait]
impl Server for HttpServer {
    async fn listen_and_serve(&self) -> Result<()> {
        HttpServer::listen_and_serve(self).await
    }
}
