//! UI layer: axum router, WebSocket / HTTP handlers and background tasks.

pub mod config;
mod handler;
mod server;
mod signal;
pub mod state;
mod sweeper;

pub use config::ServerConfig;
pub use server::Server;
pub use signal::shutdown_signal;
pub use sweeper::spawn_liveness_sweeper;
