// Configuration loading and management.

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Port used when no override is supplied.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the greeting service.
///
/// The port is resolved once at startup and injected into the application
/// constructor; nothing reads the process environment after that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    port: u16,
}

impl Config {
    /// Creates a config with an explicit port.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Resolves the config from the CLI override when present, otherwise
    /// from the `PORT` environment variable, otherwise the default.
    pub fn resolve(cli_port: Option<u16>) -> Result<Self> {
        match cli_port {
            Some(port) => Ok(Self::new(port)),
            None => Self::from_env(),
        }
    }

    /// Reads the `PORT` environment variable. Unset or empty falls back to
    /// the default port; an unparsable value is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(PORT_ENV).ok();
        let port = parse_port(raw.as_deref())
            .with_context(|| format!("invalid {} environment variable", PORT_ENV))?;
        Ok(Self::new(port))
    }

    /// Returns the TCP port the server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the all-interfaces listen address for this config.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(s) if s.trim().is_empty() => Ok(DEFAULT_PORT),
        Some(s) => s
            .trim()
            .parse::<u16>()
            .map_err(|e| anyhow!("{:?} is not a valid TCP port: {}", s, e)),
    }
}
