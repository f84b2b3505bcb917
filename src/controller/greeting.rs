// Package api provides the fixed greeting controller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};

use crate::http::Controller;

/// Fixed body returned for every request.
pub const GREETING: &str = "Hello, world!";

/// GreetingController answers every request with the fixed greeting.
///
/// There is deliberately no routing table: any method on any path gets the
/// same response, so the handler is registered as the router fallback.
#[derive(Clone, Default)]
pub struct GreetingController;

impl GreetingController {
    /// Creates a new greeting controller.
    pub fn new() -> Self {
        Self
    }

    /// Handles the greeting request.
    async fn greet() -> Response {
        (StatusCode::OK, GREETING).into_response()
    }
}

impl Controller for GreetingController {
    fn add_route(&self, router: Router) -> Router {
        router.fallback(Self::greet)
    }
}
