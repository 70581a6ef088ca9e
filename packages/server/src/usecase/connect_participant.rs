//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - ID の生成と登録、welcome イベントの構築、user_joined のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新規参加者に参加者一覧と直近の履歴が届くことを保証
//! - ID 衝突時に再生成されることを保証（同じ ID の接続が二重に登録されない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 異常系：ID 生成が衝突し続ける場合
//! - エッジケース：最初の生成だけ衝突する場合（再生成で成功）
//! - 競合：welcome の構築中に送られたメッセージが二重に届かない

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastSequencer, ConnectionRegistry, HistoryRepository, MessagePusher, ParticipantId,
    ParticipantIdGenerator, PusherChannel, RegistryError, ServerEvent, Timestamp,
};

use super::error::ConnectError;

/// ID 衝突時に再生成を試みる最大回数
pub const MAX_ID_ATTEMPTS: usize = 8;

/// 接続に成功した参加者
#[derive(Debug, Clone)]
pub struct Connected {
    pub participant_id: ParticipantId,
    /// 新規参加者だけに送る welcome イベント
    pub welcome: ServerEvent,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<dyn HistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: BroadcastSequencer,
    id_generator: Arc<dyn ParticipantIdGenerator>,
    clock: Arc<dyn Clock>,
    /// welcome で再送する直近メッセージ数
    welcome_history_len: usize,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        history: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: BroadcastSequencer,
        id_generator: Arc<dyn ParticipantIdGenerator>,
        clock: Arc<dyn Clock>,
        welcome_history_len: usize,
    ) -> Self {
        Self {
            registry,
            history,
            message_pusher,
            sequencer,
            id_generator,
            clock,
            welcome_history_len,
        }
    }

    /// 参加者接続を実行
    ///
    /// 登録から welcome の構築までを sequencer のロック下で行うため、
    /// 送信されたメッセージは welcome の履歴か、登録後のチャンネルのどちらか一方にだけ現れる。
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Connected)` - 割り当てた ID と welcome イベント
    /// * `Err(ConnectError)` - 一意な ID を割り当てられなかった
    pub async fn execute(&self, sender: PusherChannel) -> Result<Connected, ConnectError> {
        let _guard = self.sequencer.lock().await;

        // 1. ID を生成して登録（衝突した場合は再生成）
        let participant_id = self.register_with_fresh_id(sender).await?;

        // 2. welcome イベントを構築
        let online_users = self.registry.snapshot().await;
        let online_count = online_users.len();
        let history = self.history.recent(self.welcome_history_len).await;
        let welcome = ServerEvent::Welcome {
            participant_id: participant_id.clone(),
            online_users,
            online_count,
            history,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };

        Ok(Connected {
            participant_id,
            welcome,
        })
    }

    async fn register_with_fresh_id(
        &self,
        sender: PusherChannel,
    ) -> Result<ParticipantId, ConnectError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.id_generator.generate();
            match self.registry.register(candidate.clone(), sender.clone()).await {
                Ok(()) => return Ok(candidate),
                Err(RegistryError::DuplicateIdentity(id)) => {
                    tracing::warn!(
                        "Generated participant id '{}' is already registered (attempt {}/{}), regenerating",
                        id,
                        attempt,
                        MAX_ID_ATTEMPTS
                    );
                }
            }
        }
        Err(ConnectError::IdentityExhausted(MAX_ID_ATTEMPTS))
    }

    /// 参加者が join したことを既存の参加者にブロードキャスト
    ///
    /// # Returns
    ///
    /// 送信できた宛先の数
    pub async fn broadcast_participant_joined(&self, participant_id: &ParticipantId) -> usize {
        let _guard = self.sequencer.lock().await;
        let event = ServerEvent::UserJoined {
            participant_id: participant_id.clone(),
            online_count: self.registry.size().await,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher
            .fanout(&event, Some(participant_id.clone()))
            .await
    }

    /// welcome を届けられなかった参加者を、誰にも通知せずに登録から外す
    ///
    /// `user_joined` を送る前の接続にだけ使う。
    pub async fn abandon(&self, participant_id: &ParticipantId) -> bool {
        let _guard = self.sequencer.lock().await;
        self.registry.unregister(participant_id).await
    }
}
