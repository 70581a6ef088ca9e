//! UseCase: 死んだ接続の回収（liveness sweep）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SweepConnectionsUseCase::execute() メソッド
//! - 送信チャンネルが閉じた接続の削除と、退出・参加者数の通知
//!
//! ### なぜこのテストが必要か
//! - close / error イベントを発火せずに切れた接続を検出できる唯一の仕組み
//! - 明示的な切断と競合しても退出の通知が 1 回に限られることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：閉じた接続が 1 つある場合
//! - エッジケース：閉じた接続がない場合（何も通知しない）
//! - エッジケース：明示的な切断が先に完了していた場合

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastSequencer, ConnectionRegistry, MessagePusher, ParticipantId, ServerEvent, Timestamp,
};

/// 死んだ接続を回収するユースケース
pub struct SweepConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: BroadcastSequencer,
    clock: Arc<dyn Clock>,
}

impl SweepConnectionsUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: BroadcastSequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// 1 回分の sweep を実行
    ///
    /// 閉じた接続ごとに `user_left` を、1 件以上回収した場合は最後に `online_update` を
    /// ブロードキャストする。
    ///
    /// # Returns
    ///
    /// この sweep で回収した参加者 ID
    pub async fn execute(&self) -> Vec<ParticipantId> {
        let _guard = self.sequencer.lock().await;
        let stale: Vec<ParticipantId> = self
            .registry
            .entries()
            .await
            .into_iter()
            .filter(|(_, channel)| channel.is_closed())
            .map(|(id, _)| id)
            .collect();

        let mut evicted = Vec::new();
        for participant_id in stale {
            // 明示的な切断が先に削除していた場合は通知しない
            if !self.registry.unregister(&participant_id).await {
                continue;
            }
            let event = ServerEvent::UserLeft {
                participant_id: participant_id.clone(),
                online_count: self.registry.size().await,
                timestamp: Timestamp::new(self.clock.now_millis()),
            };
            self.message_pusher.fanout(&event, None).await;
            evicted.push(participant_id);
        }

        if !evicted.is_empty() {
            let online_count = self.registry.size().await;
            tracing::info!(
                "Swept {} stale connection(s), online: {}",
                evicted.len(),
                online_count
            );
            let event = ServerEvent::OnlineUpdate {
                online_count,
                timestamp: Timestamp::new(self.clock.now_millis()),
            };
            self.message_pusher.fanout(&event, None).await;
        }

        evicted
    }
}
