//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! HashMap をインメモリの接続表として使用し、全ての操作を単一の Mutex で直列化します。
//! ロックは map の操作中だけ保持され、ネットワーク送信をまたいで保持されることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionRegistry, ParticipantId, PusherChannel, RegistryError};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// Key: participant id, Value: 接続の送信チャンネル
    clients: Mutex<HashMap<ParticipantId, PusherChannel>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(
        &self,
        id: ParticipantId,
        channel: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentity(id));
        }
        tracing::debug!("Participant '{}' registered", id);
        clients.insert(id, channel);
        Ok(())
    }

    async fn unregister(&self, id: &ParticipantId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(id).is_some();
        if removed {
            tracing::debug!("Participant '{}' unregistered", id);
        }
        removed
    }

    async fn get(&self, id: &ParticipantId) -> Option<PusherChannel> {
        let clients = self.clients.lock().await;
        clients.get(id).cloned()
    }

    async fn snapshot(&self) -> Vec<ParticipantId> {
        let clients = self.clients.lock().await;
        let mut ids: Vec<ParticipantId> = clients.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn entries(&self) -> Vec<(ParticipantId, PusherChannel)> {
        let clients = self.clients.lock().await;
        clients
            .iter()
            .map(|(id, channel)| (id.clone(), channel.clone()))
            .collect()
    }

    async fn size(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }
}
