//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ChatMessageDto;

/// `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status: String,
    pub online_users: Vec<String>,
    pub online_count: usize,
    pub message_count: usize,
    /// Seconds since the server started
    pub uptime: f64,
    pub timestamp: String,
}

/// `GET /api/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesDto {
    pub messages: Vec<ChatMessageDto>,
}

/// `GET /` without an upgrade request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoDto {
    pub message: String,
    pub endpoints: EndpointsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsDto {
    pub api: String,
    pub ws: String,
}
