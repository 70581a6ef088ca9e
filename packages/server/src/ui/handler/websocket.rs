//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionLifecycle, ParticipantId},
    infrastructure::dto::{
        http::{EndpointsDto, ServiceInfoDto},
        websocket::ServerEventDto,
    },
    ui::state::AppState,
};

/// Service root: upgrade requests are accepted unconditionally, anything
/// else gets a JSON description of the service.
pub async fn root_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state))
            .into_response(),
        Err(_) => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("localhost:3000");
            Json(ServiceInfoDto {
                message: "Chat server is running".to_string(),
                endpoints: EndpointsDto {
                    api: "/api/status".to_string(),
                    ws: format!("ws://{}", host),
                },
            })
            .into_response()
        }
    }
}

/// `/ws` alias of the service root upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// When the socket can no longer be written the task ends and drops `rx`,
/// which marks the connection's channel closed for fanout and the sweeper.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut lifecycle = ConnectionLifecycle::new();

    // Connecting: allocate an identity and register the channel
    let connected = match state.connect_participant_usecase.execute(tx).await {
        Ok(connected) => connected,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            lifecycle.close();
            let _ = sender.close().await;
            return;
        }
    };
    let participant_id = connected.participant_id.clone();

    // Send welcome directly so it precedes anything queued on the channel
    let sent = match ServerEventDto::from(&connected.welcome).to_json() {
        Ok(welcome_json) => sender.send(Message::Text(welcome_json.into())).await,
        Err(e) => {
            tracing::error!("Failed to serialize welcome for '{}': {}", participant_id, e);
            Ok(())
        }
    };
    if let Err(e) = sent {
        tracing::error!("Failed to send welcome to '{}': {}", participant_id, e);
        lifecycle.close();
        // user_joined was never announced, so leave without user_left
        state
            .connect_participant_usecase
            .abandon(&participant_id)
            .await;
        return;
    }
    lifecycle.open();
    tracing::info!("Participant '{}' connected, welcome sent", participant_id);

    state
        .connect_participant_usecase
        .broadcast_participant_joined(&participant_id)
        .await;

    let send_task = pusher_loop(rx, sender);
    receive_loop(receiver, send_task, &state, &participant_id, &mut lifecycle).await;

    // Closing → Closed: unregister and announce exactly once
    lifecycle.begin_closing();
    state
        .disconnect_participant_usecase
        .execute(&participant_id)
        .await;
    lifecycle.close();
}

/// Handles inbound frames one at a time, in receipt order, until the client
/// goes away or the pusher loop stops.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    mut send_task: JoinHandle<()>,
    state: &AppState,
    participant_id: &ParticipantId,
    lifecycle: &mut ConnectionLifecycle,
) {
    loop {
        let frame = tokio::select! {
            frame = receiver.next() => frame,
            _ = &mut send_task => {
                tracing::info!("Outbound stream to '{}' closed", participant_id);
                return;
            }
        };

        let msg = match frame {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::error!("WebSocket error ({}): {}", participant_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                if !lifecycle.can_dispatch() {
                    tracing::debug!(
                        "Ignoring frame from '{}' in {:?}",
                        participant_id,
                        lifecycle.state()
                    );
                    continue;
                }
                tracing::debug!("Received text from '{}': {}", participant_id, text);
                if let Err(e) = state
                    .dispatch_message_usecase
                    .dispatch(participant_id, text.as_str())
                    .await
                {
                    tracing::warn!("Rejected frame from '{}': {}", participant_id, e);
                }
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", participant_id);
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Participant '{}' requested close", participant_id);
                break;
            }
        }
    }

    send_task.abort();
}
