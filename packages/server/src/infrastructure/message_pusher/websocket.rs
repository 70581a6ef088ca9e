//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - イベントを一度だけ JSON にシリアライズし、ConnectionRegistry の各接続へ送信
//! - 送信は best-effort: 閉じた接続への送信失敗はログに残してスキップし、残りの宛先への送信を続ける
//!
//! ## 設計ノート
//!
//! 送信先は各接続の `UnboundedSender` であり、実際のソケット書き込みは UI 層の pusher loop が行います。
//! そのため Registry のロックがネットワーク送信をまたいで保持されることはありません。
//! 同じ宛先へのイベントはチャンネルに投入された順に届きます。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{ConnectionRegistry, MessagePushError, MessagePusher, ParticipantId, ServerEvent},
    infrastructure::dto::websocket::ServerEventDto,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネルを保持する Registry
    registry: Arc<dyn ConnectionRegistry>,
}

impl WebSocketMessagePusher {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    fn serialize(event: &ServerEvent) -> Result<String, MessagePushError> {
        ServerEventDto::from(event)
            .to_json()
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let Some(sender) = self.registry.get(participant_id).await else {
            return Err(MessagePushError::ClientNotFound(
                participant_id.as_str().to_string(),
            ));
        };

        let content = Self::serialize(event)?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed '{}' to participant '{}'",
            event.kind(),
            participant_id
        );
        Ok(())
    }

    async fn fanout(&self, event: &ServerEvent, exclude: Option<ParticipantId>) -> usize {
        let content = match Self::serialize(event) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to serialize '{}' event: {}", event.kind(), e);
                return 0;
            }
        };

        let mut delivered = 0;
        for (id, sender) in self.registry.entries().await {
            if exclude.as_ref() == Some(&id) {
                continue;
            }
            if sender.is_closed() {
                tracing::debug!("Skipping closed connection '{}' during fanout", id);
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push '{}' to '{}': {}", event.kind(), id, e);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Fanned out '{}' to {} connection(s)", event.kind(), delivered);

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Timestamp, infrastructure::registry::InMemoryConnectionRegistry};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信
    // - fanout: 送信者除外・閉じた接続のスキップ・部分失敗の許容
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース
    // 2. push_to の失敗ケース（クライアントが存在しない）
    // 3. fanout で除外指定したクライアントには届かない
    // 4. fanout で閉じた接続が混ざっていても他の宛先には届く
    // ========================================

    fn id(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    fn online_update() -> ServerEvent {
        ServerEvent::OnlineUpdate {
            online_count: 2,
            timestamp: Timestamp::new(0),
        }
    }

    fn create_test_pusher() -> (WebSocketMessagePusher, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = WebSocketMessagePusher::new(registry.clone());
        (pusher, registry)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにイベントを送信できる
        // given (前提条件):
        let (pusher, registry) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(id("alice"), tx).await.unwrap();

        // when (操作):
        let result = pusher.push_to(&id("alice"), &online_update()).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await.unwrap();
        assert!(received.contains(r#""type":"online_update""#));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let (pusher, _registry) = create_test_pusher();

        // when (操作):
        let result = pusher.push_to(&id("nonexistent"), &online_update()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_fanout_excludes_sender() {
        // テスト項目: 除外指定したクライアント以外の全員に届く
        // given (前提条件):
        let (pusher, registry) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        registry.register(id("alice"), tx1).await.unwrap();
        registry.register(id("bob"), tx2).await.unwrap();
        registry.register(id("charlie"), tx3).await.unwrap();

        // when (操作):
        let delivered = pusher.fanout(&online_update(), Some(id("alice"))).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_ok());
        assert!(rx3.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_fanout_skips_closed_connections() {
        // テスト項目: 閉じた接続が混ざっていても残りの宛先への送信は続く
        // given (前提条件):
        let (pusher, registry) = create_test_pusher();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(id("alice"), tx1).await.unwrap();
        registry.register(id("bob"), tx2).await.unwrap();
        drop(rx1);

        // when (操作):
        let delivered = pusher.fanout(&online_update(), None).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(rx2.try_recv().is_ok());
        // 閉じた接続の回収は sweeper の責務なので Registry には残る
        assert_eq!(registry.size().await, 2);
    }

    #[tokio::test]
    async fn test_fanout_with_no_connections() {
        // テスト項目: 接続がなくてもエラーにならない
        // given (前提条件):
        let (pusher, _registry) = create_test_pusher();

        // when (操作):
        let delivered = pusher.fanout(&online_update(), None).await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_fanout_preserves_order_per_recipient() {
        // テスト項目: 同じ宛先には fanout を呼んだ順にイベントが届く
        // given (前提条件):
        let (pusher, registry) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(id("alice"), tx).await.unwrap();

        // when (操作):
        for count in 1..=3 {
            let event = ServerEvent::OnlineUpdate {
                online_count: count,
                timestamp: Timestamp::new(0),
            };
            pusher.fanout(&event, None).await;
        }

        // then (期待する結果):
        for count in 1..=3 {
            let received = rx.recv().await.unwrap();
            assert!(received.contains(&format!(r#""onlineCount":{}"#, count)));
        }
    }
}
