// Demo server bootstrap for integration tests.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::Config;
use crate::shutdown::GracefulShutdown;

/// Running server instance under test.
pub struct DemoServer {
    port: u16,
    shutdown_token: CancellationToken,
    serve_handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl DemoServer {
    /// Boots the app on the configured port and waits until it answers.
    pub async fn start(cfg: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let shutdown_token = CancellationToken::new();
        let graceful = Arc::new(GracefulShutdown::new(shutdown_token.clone()));
        graceful.add(1);

        let app = App::new(shutdown_token.clone(), cfg)?;
        let serve_handle = app.serve(graceful);

        let url = format!("http://127.0.0.1:{}/", cfg.port());
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        loop {
            if serve_handle.is_finished() {
                return Err("listener stopped before becoming ready".into());
            }
            if let Ok(resp) = reqwest::get(&url).await {
                if resp.status().is_success() {
                    break;
                }
            }
            if tokio::time::Instant::now() > deadline {
                return Err("timed out waiting for server to become ready".into());
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok(Self {
            port: cfg.port(),
            shutdown_token,
            serve_handle,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests shutdown and waits for the listener to stop.
    pub async fn stop(self) {
        self.shutdown_token.cancel();
        let _ = self.serve_handle.await;
    }
}
