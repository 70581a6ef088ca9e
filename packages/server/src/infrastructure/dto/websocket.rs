//! WebSocket event DTOs.
//!
//! Every event is a JSON object discriminated by `type`; field names are camelCase.

use serde::{Deserialize, Serialize};

/// Greeting carried by the `welcome` event.
pub const WELCOME_TEXT: &str = "Welcome to the chat room!";

/// Event discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Welcome,
    ChatMessage,
    UserJoined,
    UserLeft,
    Typing,
    UserUpdate,
    OnlineUpdate,
    Error,
}

/// `chat_message` event (also the element type of `messageHistory`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub r#type: MessageType,
    pub message_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub timestamp: String,
}

/// `welcome` event, sent once right after accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    pub r#type: MessageType,
    pub user_id: String,
    pub timestamp: String,
    pub message: String,
    pub online_users: Vec<String>,
    pub online_count: usize,
    pub message_history: Vec<ChatMessageDto>,
}

/// `user_joined` / `user_left` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceMessage {
    pub r#type: MessageType,
    pub user_id: String,
    pub timestamp: String,
    pub online_count: usize,
}

/// `typing` / `user_update` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantNameMessage {
    pub r#type: MessageType,
    pub user_id: String,
    pub username: String,
    pub timestamp: String,
}

/// `online_update` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUpdateMessage {
    pub r#type: MessageType,
    pub online_count: usize,
    pub timestamp: String,
}

/// `error` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
    pub timestamp: String,
}

/// Any server to client event, serialized as its inner object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServerEventDto {
    Welcome(WelcomeMessage),
    ChatMessage(ChatMessageDto),
    Presence(PresenceMessage),
    ParticipantName(ParticipantNameMessage),
    OnlineUpdate(OnlineUpdateMessage),
    Error(ErrorMessage),
}

impl ServerEventDto {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
