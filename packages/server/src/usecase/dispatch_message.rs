//! UseCase: 受信フレームのルーティング
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchMessageUseCase::dispatch() メソッド
//! - `type` ごとのハンドラへの振り分けと、不正なフレームへの error 返信
//!
//! ### なぜこのテストが必要か
//! - 不正なフレームは送信者にだけ error を返し、ブロードキャストも状態変更もしないことを保証
//! - 切断済みの参加者からのフレームが黙って破棄されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：chat_message / typing / user_update
//! - 異常系：JSON でないフレーム、未知の type
//! - エッジケース：Registry から削除済みの送信者

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ClientCommand, ConnectionRegistry, DispatchError, MessagePusher, ParticipantId, ServerEvent,
    Timestamp,
};

use super::{NotifyTypingUseCase, SendMessageUseCase, UpdateUserUseCase};

/// 受信フレームを種類ごとのハンドラに振り分けるユースケース
pub struct DispatchMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    send_message: Arc<SendMessageUseCase>,
    notify_typing: Arc<NotifyTypingUseCase>,
    update_user: Arc<UpdateUserUseCase>,
}

impl DispatchMessageUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        send_message: Arc<SendMessageUseCase>,
        notify_typing: Arc<NotifyTypingUseCase>,
        update_user: Arc<UpdateUserUseCase>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
            send_message,
            notify_typing,
            update_user,
        }
    }

    /// 受信フレームを処理
    ///
    /// # Returns
    ///
    /// * `Ok(())` - ハンドラが実行された、または送信者が切断済みで破棄した
    /// * `Err(DispatchError)` - 不正なフレーム（送信者には error を返信済み）
    pub async fn dispatch(&self, sender: &ParticipantId, raw: &str) -> Result<(), DispatchError> {
        // 切断済みの接続からのフレームは黙って破棄する
        if self.registry.get(sender).await.is_none() {
            tracing::debug!("Dropping frame from unregistered participant '{}'", sender);
            return Ok(());
        }

        let command = match ClientCommand::decode(raw) {
            Ok(command) => command,
            Err(e) => {
                self.reply_error(sender, &e).await;
                return Err(e);
            }
        };

        match command {
            ClientCommand::ChatMessage { content, username } => {
                self.send_message.execute(sender, content, username).await;
            }
            ClientCommand::Typing { username } => {
                self.notify_typing.execute(sender, username).await;
            }
            ClientCommand::UserUpdate { username } => {
                self.update_user.execute(sender, username).await;
            }
        }

        Ok(())
    }

    async fn reply_error(&self, sender: &ParticipantId, error: &DispatchError) {
        let event = ServerEvent::Error {
            message: error.client_message().to_string(),
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        if let Err(e) = self.message_pusher.push_to(sender, &event).await {
            tracing::warn!("Failed to send error reply to '{}': {}", sender, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BroadcastSequencer, HistoryRepository, MockMessagePusher},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
            repository::InMemoryHistoryRepository,
        },
    };
    use hiroba_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn id(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    fn create_router(
        registry: Arc<InMemoryConnectionRegistry>,
        history: Arc<InMemoryHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> DispatchMessageUseCase {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(0));
        DispatchMessageUseCase::new(
            registry,
            message_pusher.clone(),
            clock.clone(),
            Arc::new(SendMessageUseCase::new(
                history,
                message_pusher.clone(),
                BroadcastSequencer::new(),
                clock.clone(),
            )),
            Arc::new(NotifyTypingUseCase::new(message_pusher.clone(), clock.clone())),
            Arc::new(UpdateUserUseCase::new(message_pusher, clock)),
        )
    }

    async fn register(
        registry: &InMemoryConnectionRegistry,
        name: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id(name), tx).await.unwrap();
        rx
    }

    #[tokio::test]
    async fn test_malformed_frame_replies_error_without_broadcast() {
        // テスト項目: JSON でないフレームには error が 1 回だけ返り、ブロードキャストも履歴追加もない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let _rx = register(&registry, "alice").await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .withf(|to, event| {
                to.as_str() == "alice" && matches!(event, ServerEvent::Error { .. })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        message_pusher.expect_fanout().never();
        let router = create_router(registry, history.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = router.dispatch(&id("alice"), "not json at all").await;

        // then (期待する結果):
        assert!(matches!(result, Err(DispatchError::MalformedPayload(_))));
        assert_eq!(history.count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_type_replies_error_without_broadcast() {
        // テスト項目: 未知の type には error が 1 回だけ返り、ブロードキャストはない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let _rx = register(&registry, "alice").await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .withf(|_, event| matches!(event, ServerEvent::Error { .. }))
            .times(1)
            .returning(|_, _| Ok(()));
        message_pusher.expect_fanout().never();
        let router = create_router(registry, history.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = router.dispatch(&id("alice"), r#"{"type":"bogus"}"#).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DispatchError::UnknownMessageType("bogus".to_string()))
        );
        assert_eq!(history.count().await, 0);
    }

    #[tokio::test]
    async fn test_frame_from_unregistered_sender_is_dropped() {
        // テスト項目: Registry にいない送信者のフレームは黙って破棄される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_push_to().never();
        message_pusher.expect_fanout().never();
        let router = create_router(registry, history.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = router
            .dispatch(&id("ghost"), r#"{"type":"chat_message","content":"boo"}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(history.count().await, 0);
    }

    #[tokio::test]
    async fn test_error_reply_reaches_sender_only() {
        // テスト項目: error は送信者にだけ届き、他の参加者には届かない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let mut rx_a = register(&registry, "alice").await;
        let mut rx_b = register(&registry, "bob").await;
        let message_pusher = Arc::new(WebSocketMessagePusher::new(registry.clone()));
        let router = create_router(registry, history, message_pusher);

        // when (操作):
        let _ = router.dispatch(&id("alice"), "{").await;

        // then (期待する結果):
        let received: serde_json::Value =
            serde_json::from_str(&rx_a.recv().await.unwrap()).unwrap();
        assert_eq!(received["type"], "error");
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_three_participants_chat_scenario() {
        // テスト項目: A, B, C が接続中に A が送ったメッセージが 3 人全員に届き、履歴が 1 件になる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let mut rx_a = register(&registry, "A").await;
        let mut rx_b = register(&registry, "B").await;
        let mut rx_c = register(&registry, "C").await;
        let message_pusher = Arc::new(WebSocketMessagePusher::new(registry.clone()));
        let router = create_router(registry, history.clone(), message_pusher);

        // when (操作):
        let result = router
            .dispatch(
                &id("A"),
                r#"{"type":"chat_message","content":"hi","username":"alice"}"#,
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
            let received: serde_json::Value =
                serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            assert_eq!(received["type"], "chat_message");
            assert_eq!(received["userId"], "A");
            assert_eq!(received["content"], "hi");
            assert_eq!(received["username"], "alice");
            assert!(rx.try_recv().is_err());
        }
        assert_eq!(history.count().await, 1);
    }

    #[tokio::test]
    async fn test_typing_routes_to_everyone_but_sender() {
        // テスト項目: typing は送信者以外に振り分けられる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_fanout()
            .withf(|event, exclude| {
                matches!(event, ServerEvent::Typing { .. })
                    && exclude.as_ref().map(|id| id.as_str()) == Some("alice")
            })
            .times(1)
            .returning(|_, _| 1);
        let _rx = register(&registry, "alice").await;
        let router = create_router(registry, history.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = router.dispatch(&id("alice"), r#"{"type":"typing"}"#).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(history.count().await, 0);
    }

    #[tokio::test]
    async fn test_user_update_routes_to_everyone() {
        // テスト項目: user_update は除外なしで全員に振り分けられる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let history = Arc::new(InMemoryHistoryRepository::default());
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_fanout()
            .withf(|event, exclude| {
                matches!(event, ServerEvent::UserUpdate { .. }) && exclude.is_none()
            })
            .times(1)
            .returning(|_, _| 1);
        let _rx = register(&registry, "alice").await;
        let router = create_router(registry, history, Arc::new(message_pusher));

        // when (操作):
        let result = router
            .dispatch(&id("alice"), r#"{"type":"user_update","username":"ally"}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
