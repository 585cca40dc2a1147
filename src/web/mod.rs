//! HTTP server, handlers and admin authentication

pub mod auth;
pub mod handlers;
pub mod server;

// Re-exports for convenience
pub use server::{create_router, run_server, AppState};
