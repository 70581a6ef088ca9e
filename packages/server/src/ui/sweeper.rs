//! Background liveness sweeper.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::usecase::SweepConnectionsUseCase;

/// Spawn a task that runs a liveness sweep every `period`.
///
/// The first sweep happens one full period after start. The task runs until
/// the returned handle is aborted.
pub fn spawn_liveness_sweeper(
    usecase: Arc<SweepConnectionsUseCase>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let evicted = usecase.execute().await;
            tracing::debug!("Liveness sweep finished, evicted {}", evicted.len());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BroadcastSequencer, ConnectionRegistry, ParticipantId},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
        },
    };
    use hiroba_shared::time::SystemClock;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_within_one_interval() {
        // テスト項目: 閉じた接続が 1 回の sweep 間隔のうちに回収される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(registry.clone()));
        let usecase = Arc::new(SweepConnectionsUseCase::new(
            registry.clone(),
            message_pusher,
            BroadcastSequencer::new(),
            Arc::new(SystemClock),
        ));
        let (tx, rx) = mpsc::unbounded_channel();
        registry
            .register(ParticipantId::new("A".to_string()).unwrap(), tx)
            .await
            .unwrap();
        drop(rx);

        // when (操作):
        let handle = spawn_liveness_sweeper(usecase, Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(31)).await;

        // then (期待する結果):
        assert_eq!(registry.size().await, 0);
        handle.abort();
    }
}
