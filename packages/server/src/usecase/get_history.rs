//! UseCase: メッセージ履歴の取得（読み取り専用）

use std::sync::Arc;

use crate::domain::{ChatMessage, HistoryRepository};

/// limit 未指定時に返す件数
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub struct GetHistoryUseCase {
    history: Arc<dyn HistoryRepository>,
}

impl GetHistoryUseCase {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// 直近 `limit` 件を古い順に取得。`None` または 0 の場合は既定の件数。
    pub async fn execute(&self, limit: Option<usize>) -> Vec<ChatMessage> {
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);
        self.history.recent(limit).await
    }
}
