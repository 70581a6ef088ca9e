//! InMemory History Repository 実装
//!
//! ドメイン層が定義する HistoryRepository trait の具体的な実装。
//! プロセスの起動時に空の状態で作成され、永続化はされません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryBuffer, HistoryRepository};

/// インメモリ History Repository 実装
pub struct InMemoryHistoryRepository {
    /// 直近メッセージのリングバッファ
    history: Mutex<HistoryBuffer>,
}

impl InMemoryHistoryRepository {
    /// 指定した容量で新しい InMemoryHistoryRepository を作成
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Mutex::new(HistoryBuffer::new(capacity)),
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self {
            history: Mutex::new(HistoryBuffer::default()),
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, message: ChatMessage) {
        let mut history = self.history.lock().await;
        history.append(message);
    }

    async fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let history = self.history.lock().await;
        history.recent(n)
    }

    async fn count(&self) -> usize {
        let history = self.history.lock().await;
        history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageContent, MessageId, ParticipantId, Timestamp};

    fn create_test_message(seq: usize) -> ChatMessage {
        let participant_id = ParticipantId::new("alice".to_string()).unwrap();
        ChatMessage::new(
            MessageId::new(format!("m{}", seq)).unwrap(),
            participant_id.clone(),
            DisplayName::default_for(&participant_id),
            MessageContent::new(format!("message {}", seq)),
            Timestamp::new(seq as i64),
        )
    }

    #[tokio::test]
    async fn test_append_and_recent() {
        // テスト項目: 追加したメッセージを古い順に取得できる
        // given (前提条件):
        let repo = InMemoryHistoryRepository::default();

        // when (操作):
        repo.append(create_test_message(1)).await;
        repo.append(create_test_message(2)).await;

        // then (期待する結果):
        assert_eq!(repo.count().await, 2);
        let recent = repo.recent(10).await;
        assert_eq!(recent[0].message_id.as_str(), "m1");
        assert_eq!(recent[1].message_id.as_str(), "m2");
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        // テスト項目: 容量を超えると最も古いメッセージから破棄される
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new(3);

        // when (操作):
        for seq in 0..5 {
            repo.append(create_test_message(seq)).await;
        }

        // then (期待する結果):
        assert_eq!(repo.count().await, 3);
        let ids: Vec<String> = repo
            .recent(3)
            .await
            .into_iter()
            .map(|m| m.message_id.into_string())
            .collect();
        assert_eq!(ids, vec!["m2", "m3", "m4"]);
    }
}
