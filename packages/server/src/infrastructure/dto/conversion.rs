//! Conversion logic from domain entities and events to DTOs.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{ServerEvent, entity};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatMessageDto {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            r#type: dto::MessageType::ChatMessage,
            message_id: model.message_id.into_string(),
            user_id: model.participant_id.into_string(),
            username: model.display_name.into_string(),
            content: model.content.into_string(),
            timestamp: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<&ServerEvent> for dto::ServerEventDto {
    fn from(event: &ServerEvent) -> Self {
        match event.clone() {
            ServerEvent::Welcome {
                participant_id,
                online_users,
                online_count,
                history,
                timestamp,
            } => Self::Welcome(dto::WelcomeMessage {
                r#type: dto::MessageType::Welcome,
                user_id: participant_id.into_string(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
                message: dto::WELCOME_TEXT.to_string(),
                online_users: online_users.into_iter().map(|id| id.into_string()).collect(),
                online_count,
                message_history: history.into_iter().map(Into::into).collect(),
            }),
            ServerEvent::ChatMessage(message) => Self::ChatMessage(message.into()),
            ServerEvent::UserJoined {
                participant_id,
                online_count,
                timestamp,
            } => Self::Presence(dto::PresenceMessage {
                r#type: dto::MessageType::UserJoined,
                user_id: participant_id.into_string(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
                online_count,
            }),
            ServerEvent::UserLeft {
                participant_id,
                online_count,
                timestamp,
            } => Self::Presence(dto::PresenceMessage {
                r#type: dto::MessageType::UserLeft,
                user_id: participant_id.into_string(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
                online_count,
            }),
            ServerEvent::Typing {
                participant_id,
                display_name,
                timestamp,
            } => Self::ParticipantName(dto::ParticipantNameMessage {
                r#type: dto::MessageType::Typing,
                user_id: participant_id.into_string(),
                username: display_name.into_string(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            }),
            ServerEvent::UserUpdate {
                participant_id,
                display_name,
                timestamp,
            } => Self::ParticipantName(dto::ParticipantNameMessage {
                r#type: dto::MessageType::UserUpdate,
                user_id: participant_id.into_string(),
                username: display_name.into_string(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            }),
            ServerEvent::OnlineUpdate {
                online_count,
                timestamp,
            } => Self::OnlineUpdate(dto::OnlineUpdateMessage {
                r#type: dto::MessageType::OnlineUpdate,
                online_count,
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            }),
            ServerEvent::Error { message, timestamp } => Self::Error(dto::ErrorMessage {
                r#type: dto::MessageType::Error,
                message,
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            }),
        }
    }
}
