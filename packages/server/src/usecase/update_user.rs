//! UseCase: 表示名の更新通知
//!
//! サーバーは表示名を保持しない。各イベント・メッセージが送信時点の名前を運ぶだけなので、
//! 名前を変更しても過去の履歴は変わらない。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{DisplayName, MessagePusher, ParticipantId, ServerEvent, Timestamp};

pub struct UpdateUserUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl UpdateUserUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// Broadcast `user_update` to everyone including `sender`. Returns the number of recipients.
    pub async fn execute(&self, sender: &ParticipantId, username: Option<String>) -> usize {
        let event = ServerEvent::UserUpdate {
            participant_id: sender.clone(),
            display_name: DisplayName::resolve(username, sender),
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher.fanout(&event, None).await
    }
}
