//! UseCase layer: one struct per operation, wired to the domain traits.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod dispatch_message;
pub mod error;
pub mod get_history;
pub mod get_status;
pub mod notify_typing;
pub mod send_message;
pub mod sweep_connections;
pub mod update_user;

pub use connect_participant::{Connected, ConnectParticipantUseCase, MAX_ID_ATTEMPTS};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatch_message::DispatchMessageUseCase;
pub use error::ConnectError;
pub use get_history::{DEFAULT_HISTORY_LIMIT, GetHistoryUseCase};
pub use get_status::{GetStatusUseCase, StatusSnapshot};
pub use notify_typing::NotifyTypingUseCase;
pub use send_message::SendMessageUseCase;
pub use sweep_connections::SweepConnectionsUseCase;
pub use update_user::UpdateUserUseCase;
