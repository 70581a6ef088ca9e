//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{get_messages, get_status, health_check};
pub use websocket::{root_handler, websocket_handler};
