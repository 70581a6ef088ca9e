//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信（通知）のインターフェース。
//! 送信は best-effort であり、個々の宛先への送信失敗はファンアウト全体を中断しない。

use async_trait::async_trait;

use super::{MessagePushError, ParticipantId, ServerEvent};

/// イベント送信の抽象化
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// `exclude` 以外の全ての接続中クライアントにイベントを送信
    ///
    /// 戻り値は送信に成功した宛先の数。
    async fn fanout(&self, event: &ServerEvent, exclude: Option<ParticipantId>) -> usize;
}
