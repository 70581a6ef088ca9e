//! UseCase: 入力中インジケーターの通知
//!
//! 履歴には残らない一時的なイベント。送信者以外の全員に届ける。
//! デバウンスやレート制限はクライアント側の責務。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{DisplayName, MessagePusher, ParticipantId, ServerEvent, Timestamp};

pub struct NotifyTypingUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl NotifyTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// Broadcast `typing` to everyone except `sender`. Returns the number of recipients.
    pub async fn execute(&self, sender: &ParticipantId, username: Option<String>) -> usize {
        let event = ServerEvent::Typing {
            participant_id: sender.clone(),
            display_name: DisplayName::resolve(username, sender),
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher.fanout(&event, Some(sender.clone())).await
    }
}
