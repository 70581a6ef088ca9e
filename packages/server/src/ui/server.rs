//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration, time::Instant};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchMessageUseCase,
    GetHistoryUseCase, GetStatusUseCase, SweepConnectionsUseCase,
};

use super::{
    handler::{get_messages, get_status, health_check, root_handler, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
    sweeper::spawn_liveness_sweeper,
};

/// Real-time broadcast server
///
/// This struct encapsulates the wired usecases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = hiroba_server::bootstrap::build_server(&config);
/// server.run(config.bind_addr()).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// DispatchMessageUseCase（受信フレームのルーティング）
    dispatch_message_usecase: Arc<DispatchMessageUseCase>,
    /// GetStatusUseCase（サーバー状態取得のユースケース）
    get_status_usecase: Arc<GetStatusUseCase>,
    /// GetHistoryUseCase（メッセージ履歴取得のユースケース）
    get_history_usecase: Arc<GetHistoryUseCase>,
    /// SweepConnectionsUseCase（死んだ接続の回収）
    sweep_connections_usecase: Arc<SweepConnectionsUseCase>,
    sweep_interval: Duration,
    started_at: Instant,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for participant connection
    /// * `disconnect_participant_usecase` - UseCase for participant disconnection
    /// * `dispatch_message_usecase` - UseCase for routing inbound frames
    /// * `get_status_usecase` - UseCase for the status endpoint
    /// * `get_history_usecase` - UseCase for the history endpoint
    /// * `sweep_connections_usecase` - UseCase run periodically by the liveness sweeper
    /// * `sweep_interval` - Period of the liveness sweep
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        dispatch_message_usecase: Arc<DispatchMessageUseCase>,
        get_status_usecase: Arc<GetStatusUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        sweep_connections_usecase: Arc<SweepConnectionsUseCase>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            dispatch_message_usecase,
            get_status_usecase,
            get_history_usecase,
            sweep_connections_usecase,
            sweep_interval,
            started_at: Instant::now(),
        }
    }

    /// Build the axum router with all endpoints
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase.clone(),
            disconnect_participant_usecase: self.disconnect_participant_usecase.clone(),
            dispatch_message_usecase: self.dispatch_message_usecase.clone(),
            get_status_usecase: self.get_status_usecase.clone(),
            get_history_usecase: self.get_history_usecase.clone(),
            started_at: self.started_at,
        });

        Router::new()
            // WebSocket エンドポイント（`/` は upgrade でなければサービス情報を返す）
            .route("/", get(root_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/status", get(get_status))
            .route("/api/messages", get(get_messages))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app_state)
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `bind_addr` - The `host:port` address to bind to (e.g., "0.0.0.0:3000")
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: String) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// The liveness sweeper runs for the lifetime of the call.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let sweeper = spawn_liveness_sweeper(
            self.sweep_connections_usecase.clone(),
            self.sweep_interval,
        );

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        sweeper.abort();
        result
    }
}
