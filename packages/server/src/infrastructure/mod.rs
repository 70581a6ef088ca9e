//! Infrastructure layer: wire DTOs and the in-memory / WebSocket
//! implementations of the domain traits.

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
