//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    infrastructure::dto::http::{MessagesDto, StatusDto},
    ui::state::AppState,
};
use hiroba_shared::time::{now_millis, timestamp_to_rfc3339};

/// Query parameters for `GET /api/messages`
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Kept as text so that a non-numeric limit falls back to the default
    pub limit: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Online participants, history size and uptime
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let status = state.get_status_usecase.execute().await;

    Json(StatusDto {
        status: "running".to_string(),
        online_users: status
            .online_users
            .into_iter()
            .map(|id| id.into_string())
            .collect(),
        online_count: status.online_count,
        message_count: status.message_count,
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: timestamp_to_rfc3339(now_millis()),
    })
}

/// Most recent messages, oldest-first
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<MessagesDto> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|limit| limit.trim().parse::<usize>().ok());
    let messages = state.get_history_usecase.execute(limit).await;

    // Domain Model から DTO への変換
    Json(MessagesDto {
        messages: messages.into_iter().map(Into::into).collect(),
    })
}
