//! Events pushed from the server to connected clients.

use super::{ChatMessage, DisplayName, ParticipantId, Timestamp};

/// Server to client event. Serialized once per fanout by the message pusher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Sent once to a newcomer, immediately after accept
    Welcome {
        participant_id: ParticipantId,
        online_users: Vec<ParticipantId>,
        online_count: usize,
        history: Vec<ChatMessage>,
        timestamp: Timestamp,
    },
    ChatMessage(ChatMessage),
    UserJoined {
        participant_id: ParticipantId,
        online_count: usize,
        timestamp: Timestamp,
    },
    UserLeft {
        participant_id: ParticipantId,
        online_count: usize,
        timestamp: Timestamp,
    },
    Typing {
        participant_id: ParticipantId,
        display_name: DisplayName,
        timestamp: Timestamp,
    },
    UserUpdate {
        participant_id: ParticipantId,
        display_name: DisplayName,
        timestamp: Timestamp,
    },
    /// Emitted only by the liveness sweeper
    OnlineUpdate {
        online_count: usize,
        timestamp: Timestamp,
    },
    /// Sent to the originating connection only, never broadcast
    Error { message: String, timestamp: Timestamp },
}

impl ServerEvent {
    /// Wire discriminant of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Welcome { .. } => "welcome",
            ServerEvent::ChatMessage(_) => "chat_message",
            ServerEvent::UserJoined { .. } => "user_joined",
            ServerEvent::UserLeft { .. } => "user_left",
            ServerEvent::Typing { .. } => "typing",
            ServerEvent::UserUpdate { .. } => "user_update",
            ServerEvent::OnlineUpdate { .. } => "online_update",
            ServerEvent::Error { .. } => "error",
        }
    }
}
