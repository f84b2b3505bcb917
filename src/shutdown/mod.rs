// Package shutdown provides graceful shutdown functionality.

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Bound on how long shutdown waits for in-flight work.
pub const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
#[error("graceful shutdown timeout exceeded")]
pub struct TimeoutError;

/// Waits for an OS interrupt (or programmatic cancellation) and then drains
/// registered tasks within a bounded deadline. Tasks register via [`add`]
/// and report completion via [`done`], wait-group style.
///
/// [`add`]: GracefulShutdown::add
/// [`done`]: GracefulShutdown::done
#[derive(Clone)]
pub struct GracefulShutdown {
    shutdown_token: CancellationToken,
    timeout: Duration,
    expected: Arc<AtomicUsize>,
    finished: Arc<tokio::sync::Semaphore>,
}

impl GracefulShutdown {
    /// Creates a handler with the default 10 second drain deadline.
    pub fn new(shutdown_token: CancellationToken) -> Self {
        Self::with_timeout(shutdown_token, GRACEFUL_TIMEOUT)
    }

    /// Creates a handler with a custom drain deadline.
    pub fn with_timeout(shutdown_token: CancellationToken, timeout: Duration) -> Self {
        Self {
            shutdown_token,
            timeout,
            expected: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(tokio::sync::Semaphore::new(0)),
        }
    }

    /// Registers `n` tasks that must call [`done`](Self::done) before
    /// shutdown is considered complete.
    pub fn add(&self, n: usize) {
        self.expected.fetch_add(n, Ordering::AcqRel);
    }

    /// Marks one registered task as finished.
    pub fn done(&self) {
        self.finished.add_permits(1);
    }

    /// Waits for SIGINT or token cancellation, then waits for all
    /// registered tasks to complete within the deadline.
    pub async fn await_shutdown(&self) -> Result<()> {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!(
                    component = "shutdown",
                    event = "os_signal",
                    signal = "SIGINT",
                    "received interrupt"
                );
            }
            _ = self.shutdown_token.cancelled() => {
                info!(
                    component = "shutdown",
                    event = "ctx_done",
                    "cancellation requested"
                );
            }
        }

        self.cancel_and_await_with_timeout().await
    }

    async fn cancel_and_await_with_timeout(&self) -> Result<()> {
        self.shutdown_token.cancel();

        match timeout(self.timeout, self.wait_for_completion()).await {
            Ok(_) => {
                info!(
                    component = "shutdown",
                    event = "shutdown_success",
                    "service was gracefully shut down"
                );
                Ok(())
            }
            Err(_) => {
                warn!(
                    component = "shutdown",
                    event = "shutdown_timeout",
                    timeout_secs = self.timeout.as_secs(),
                    "in-flight requests abandoned after deadline"
                );
                Err(TimeoutError.into())
            }
        }
    }

    async fn wait_for_completion(&self) {
        let expected = self.expected.load(Ordering::Acquire) as u32;
        if expected == 0 {
            return;
        }
        // Closed-semaphore errors cannot occur; the semaphore is never closed.
        let _ = self.finished.acquire_many(expected).await;
    }
}
