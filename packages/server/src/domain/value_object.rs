//! Value objects for the broadcaster domain.

use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// Number of id characters used to derive a default display name.
const DEFAULT_NAME_ID_PREFIX_LEN: usize = 6;

/// Opaque participant identity assigned by the server at connection time.
///
/// Purely a correlation key: it is never authenticated and never reused
/// within the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub(super) String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::ParticipantIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client supplied, unauthenticated display name.
///
/// Not unique and not validated beyond presence: a missing or empty name
/// falls back to a name derived from the participant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Resolve the name carried by an event: the supplied username if it is
    /// non-empty, the default derived name otherwise.
    pub fn resolve(username: Option<String>, participant_id: &ParticipantId) -> Self {
        match username {
            Some(name) if !name.is_empty() => Self(name),
            _ => Self::default_for(participant_id),
        }
    }

    /// `User` followed by the first characters of the participant id.
    pub fn default_for(participant_id: &ParticipantId) -> Self {
        let prefix: String = participant_id
            .as_str()
            .chars()
            .take(DEFAULT_NAME_ID_PREFIX_LEN)
            .collect();
        Self(format!("User{}", prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Server assigned message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub(super) String);

impl MessageId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::MessageIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Chat message body. Only presence is required; emptiness is the client's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
