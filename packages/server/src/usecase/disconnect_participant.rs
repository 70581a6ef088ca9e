//! UseCase: 参加者切断処理
//!
//! 明示的な close / error と liveness sweeper のどちらから呼ばれても、
//! 退出の通知は ID ごとに高々 1 回しか行われない。
//! Registry からの削除に成功した呼び出しだけが通知を行う。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastSequencer, ConnectionRegistry, MessagePusher, ParticipantId, ServerEvent, Timestamp,
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: BroadcastSequencer,
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// `true` if this call removed the participant and announced `user_left`,
    /// `false` if it had already been removed.
    pub async fn execute(&self, participant_id: &ParticipantId) -> bool {
        let _guard = self.sequencer.lock().await;
        if !self.registry.unregister(participant_id).await {
            tracing::debug!(
                "Participant '{}' was already removed, skipping departure announcement",
                participant_id
            );
            return false;
        }

        let online_count = self.registry.size().await;
        tracing::info!(
            "Participant '{}' disconnected, online: {}",
            participant_id,
            online_count
        );

        let event = ServerEvent::UserLeft {
            participant_id: participant_id.clone(),
            online_count,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher.fanout(&event, None).await;

        true
    }
}
