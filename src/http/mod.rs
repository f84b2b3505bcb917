// HTTP module: server and the controller seam.

pub mod server;

// Re-export server types
pub use server::{HttpServer, Server};

// Common controller interface
pub use crate::controller::controller::Controller;
