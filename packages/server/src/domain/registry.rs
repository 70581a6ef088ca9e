//! Connection registry trait.

use async_trait::async_trait;

use super::{ParticipantId, PusherChannel, RegistryError};

/// Mapping from participant identity to its live connection channel.
///
/// The single source of truth for who is online. Implementations hold at
/// most one channel per identity and never swap an existing entry's channel.
/// Callers emit notifications; the registry itself has no side effects.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register a connection. Fails with `DuplicateIdentity` if `id` is present.
    async fn register(&self, id: ParticipantId, channel: PusherChannel)
    -> Result<(), RegistryError>;

    /// Remove a connection. Returns whether an entry was removed; removing an
    /// absent identity is a no-op.
    async fn unregister(&self, id: &ParticipantId) -> bool;

    async fn get(&self, id: &ParticipantId) -> Option<PusherChannel>;

    /// Identities currently registered, sorted.
    async fn snapshot(&self) -> Vec<ParticipantId>;

    /// Owned copies of every entry, for fanout and liveness scans.
    async fn entries(&self) -> Vec<(ParticipantId, PusherChannel)>;

    async fn size(&self) -> usize;
}
