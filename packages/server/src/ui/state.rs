//! Server state shared by the handlers.

use std::{sync::Arc, time::Instant};

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchMessageUseCase,
    GetHistoryUseCase, GetStatusUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// DispatchMessageUseCase（受信フレームのルーティング）
    pub dispatch_message_usecase: Arc<DispatchMessageUseCase>,
    /// GetStatusUseCase（サーバー状態取得のユースケース）
    pub get_status_usecase: Arc<GetStatusUseCase>,
    /// GetHistoryUseCase（メッセージ履歴取得のユースケース）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// サーバーの起動時刻（uptime の計算用）
    pub started_at: Instant,
}
