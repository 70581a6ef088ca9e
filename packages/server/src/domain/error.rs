//! Domain error types.

use thiserror::Error;

use super::ParticipantId;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Participant ID must not be empty")]
    ParticipantIdEmpty,

    #[error("Message ID must not be empty")]
    MessageIdEmpty,
}

/// Connection registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A live connection is already registered under this identity
    #[error("Participant '{0}' is already registered")]
    DuplicateIdentity(ParticipantId),
}

/// Errors raised while pushing a payload to a single connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Errors raised while routing an inbound frame
///
/// Both variants are answered with an `error` event to the sender only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The frame is not parseable as a structured payload for its type
    #[error("Malformed message payload: {0}")]
    MalformedPayload(String),

    /// The frame parsed but its `type` has no handler
    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
}

impl DispatchError {
    /// Text carried by the `error` event sent back to the client.
    pub fn client_message(&self) -> &'static str {
        match self {
            DispatchError::MalformedPayload(_) => "Malformed message payload",
            DispatchError::UnknownMessageType(_) => "Unknown message type",
        }
    }
}
