//! Commands sent from clients to the server.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use super::{DispatchError, MessageContent};

/// A decoded client frame. The set of commands is closed: anything else is
/// rejected as an unknown message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    ChatMessage {
        content: MessageContent,
        username: Option<String>,
    },
    Typing {
        username: Option<String>,
    },
    UserUpdate {
        username: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ChatMessagePayload {
    content: String,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsernamePayload {
    #[serde(default)]
    username: Option<String>,
}

impl ClientCommand {
    /// Decode a raw text frame.
    ///
    /// Unparseable JSON and payloads missing required fields are
    /// `MalformedPayload`; a missing or unrecognised `type` is
    /// `UnknownMessageType`. Unknown extra fields (e.g. a client supplied
    /// `messageId` or `timestamp`) are ignored.
    pub fn decode(raw: &str) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DispatchError::MalformedPayload(e.to_string()))?;

        let message_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match message_type.as_deref() {
            Some("chat_message") => {
                let payload: ChatMessagePayload = decode_payload(value)?;
                Ok(ClientCommand::ChatMessage {
                    content: MessageContent::new(payload.content),
                    username: payload.username,
                })
            }
            Some("typing") => {
                let payload: UsernamePayload = decode_payload(value)?;
                Ok(ClientCommand::Typing {
                    username: payload.username,
                })
            }
            Some("user_update") => {
                let payload: UsernamePayload = decode_payload(value)?;
                Ok(ClientCommand::UserUpdate {
                    username: payload.username,
                })
            }
            Some(other) => Err(DispatchError::UnknownMessageType(other.to_string())),
            None => Err(DispatchError::UnknownMessageType("<missing>".to_string())),
        }
    }
}

fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value).map_err(|e| DispatchError::MalformedPayload(e.to_string()))
}
