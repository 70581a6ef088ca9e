//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの構築（サーバー側で ID とタイムスタンプを付与）、履歴への追加、全員へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にもエコーが届くこと（配信確認の唯一の手段）を保証
//! - 表示名が送信時点で固定されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：username 付きのメッセージ送信
//! - エッジケース：username 省略時は ID 由来の表示名になる
//! - 競合：並行して送られたメッセージの配信順が履歴の順序と一致する

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastSequencer, ChatMessage, DisplayName, HistoryRepository, MessageContent,
    MessageIdFactory, MessagePusher, ParticipantId, ServerEvent, Timestamp,
};

/// チャットメッセージ送信のユースケース
pub struct SendMessageUseCase {
    history: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: BroadcastSequencer,
    message_ids: MessageIdFactory,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: BroadcastSequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            history,
            message_pusher,
            sequencer,
            message_ids: MessageIdFactory::new(),
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 履歴に追加したあと、送信者を含む全員にブロードキャストする。
    /// 追加とブロードキャストは sequencer のロック下で行い、配信順を履歴の順序と一致させる。
    /// content の長さや空文字列の検証は行わない（クライアント側の責務）。
    ///
    /// # Returns
    ///
    /// 作成したメッセージ
    pub async fn execute(
        &self,
        sender: &ParticipantId,
        content: MessageContent,
        username: Option<String>,
    ) -> ChatMessage {
        let _guard = self.sequencer.lock().await;
        let created_at = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(
            self.message_ids.generate(created_at),
            sender.clone(),
            DisplayName::resolve(username, sender),
            content,
            created_at,
        );

        // 1. 履歴に追加
        self.history.append(message.clone()).await;

        // 2. 送信者を含む全員にブロードキャスト
        let event = ServerEvent::ChatMessage(message.clone());
        let delivered = self.message_pusher.fanout(&event, None).await;
        tracing::info!(
            "Message from {} ({}) delivered to {} connection(s)",
            message.display_name.as_str(),
            sender,
            delivered
        );

        message
    }
}
