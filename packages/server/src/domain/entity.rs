//! Domain entities.

use serde::Serialize;

use super::{DisplayName, MessageContent, MessageId, ParticipantId, Timestamp};

/// A chat message record. Immutable once created; the display name is
/// frozen at send time so later renames never alter history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub message_id: MessageId,
    pub participant_id: ParticipantId,
    pub display_name: DisplayName,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        message_id: MessageId,
        participant_id: ParticipantId,
        display_name: DisplayName,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            message_id,
            participant_id,
            display_name,
            content,
            created_at,
        }
    }
}
