// Test support: server bootstrap and HTTP helpers.

mod common;
mod server;

pub use common::{do_request, free_port, wait_ready};
pub use server::DemoServer;
