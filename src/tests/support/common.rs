// Common test utilities for integration tests.

use std::time::Duration;

/// Picks a currently-free loopback port.
///
/// The port is released before the server binds it, so another process
/// could in principle steal it in between; good enough for tests.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind ephemeral port")
        .local_addr()
        .expect("read local addr")
        .port()
}

/// Polls the port until it answers with a success status.
pub async fn wait_ready(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("http://127.0.0.1:{}/", port);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        if let Ok(resp) = reqwest::get(&url).await {
            if resp.status().is_success() {
                return Ok(());
            }
        }
        if tokio::time::Instant::now() > deadline {
            return Err("timed out waiting for server to become ready".into());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Makes an HTTP request with an arbitrary method and returns the status
/// code and body text.
pub async fn do_request(method: &str, url: &str) -> Result<(u16, String), reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let method = reqwest::Method::from_bytes(method.as_bytes()).expect("valid HTTP method");
    let resp = client.request(method, url).send().await?;

    let status = resp.status().as_u16();
    let body = resp.text().await?;

    Ok((status, body))
}
