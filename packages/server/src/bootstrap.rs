//! Dependency wiring for the in-memory broadcaster.

use std::sync::Arc;

use hiroba_shared::time::{Clock, SystemClock};

use crate::{
    domain::{BroadcastSequencer, UuidParticipantIdGenerator},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
        repository::InMemoryHistoryRepository,
    },
    ui::{Server, ServerConfig},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchMessageUseCase,
        GetHistoryUseCase, GetStatusUseCase, NotifyTypingUseCase, SendMessageUseCase,
        SweepConnectionsUseCase, UpdateUserUseCase,
    },
};

/// Build a [`Server`] backed by in-memory state.
///
/// Dependencies are created in order:
/// 1. Registry / Repository
/// 2. MessagePusher
/// 3. UseCases
/// 4. Server
pub fn build_server(config: &ServerConfig) -> Server {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 1. Create Registry and Repository (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let history = Arc::new(InMemoryHistoryRepository::new(config.history_capacity));

    // 2. Create MessagePusher (WebSocket implementation) and the lock ordering
    //    state changes with their fanout
    let message_pusher = Arc::new(WebSocketMessagePusher::new(registry.clone()));
    let sequencer = BroadcastSequencer::new();

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        history.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        Arc::new(UuidParticipantIdGenerator),
        clock.clone(),
        config.welcome_history_len,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        history.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        clock.clone(),
    ));
    let notify_typing_usecase = Arc::new(NotifyTypingUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let update_user_usecase = Arc::new(UpdateUserUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let dispatch_message_usecase = Arc::new(DispatchMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
        send_message_usecase,
        notify_typing_usecase,
        update_user_usecase,
    ));
    let get_status_usecase = Arc::new(GetStatusUseCase::new(registry.clone(), history.clone()));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(history));
    let sweep_connections_usecase = Arc::new(SweepConnectionsUseCase::new(
        registry,
        message_pusher,
        sequencer,
        clock,
    ));

    // 4. Create the server
    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        dispatch_message_usecase,
        get_status_usecase,
        get_history_usecase,
        sweep_connections_usecase,
        config.sweep_interval,
    )
}
