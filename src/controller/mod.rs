// HTTP API controllers for the greeting service.

pub mod controller;
pub mod greeting;

// Re-export controller types for convenience
pub use greeting::{GreetingController, GREETING};
