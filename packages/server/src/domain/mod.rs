//! Domain layer: value objects, entities, events and the traits the use
//! cases depend on.

pub mod command;
pub mod connection;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod history;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod sequencer;
pub mod value_object;

pub use command::ClientCommand;
pub use connection::{ConnectionLifecycle, ConnectionState, PusherChannel};
pub use entity::ChatMessage;
pub use error::{DispatchError, MessagePushError, RegistryError, ValueObjectError};
pub use event::ServerEvent;
pub use factory::{MessageIdFactory, ParticipantIdGenerator, UuidParticipantIdGenerator};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use message_pusher::MessagePusher;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use registry::ConnectionRegistry;
pub use repository::HistoryRepository;
pub use sequencer::BroadcastSequencer;
pub use value_object::{DisplayName, MessageContent, MessageId, ParticipantId, Timestamp};
