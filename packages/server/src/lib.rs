//! Real-time message broadcaster.
//!
//! Clients connect over WebSocket, receive a welcome with the online
//! participants and recent history, and exchange chat / typing / rename
//! events that are fanned out to everyone connected.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
