//! UseCase: サーバー状態の取得（読み取り専用）

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, HistoryRepository, ParticipantId};

/// 状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub online_users: Vec<ParticipantId>,
    pub online_count: usize,
    pub message_count: usize,
}

pub struct GetStatusUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<dyn HistoryRepository>,
}

impl GetStatusUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { registry, history }
    }

    pub async fn execute(&self) -> StatusSnapshot {
        let online_users = self.registry.snapshot().await;
        StatusSnapshot {
            online_count: online_users.len(),
            online_users,
            message_count: self.history.count().await,
        }
    }
}
