//! Identifier factories.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::{MessageId, ParticipantId, Timestamp};

/// Source of fresh participant identities.
pub trait ParticipantIdGenerator: Send + Sync {
    fn generate(&self) -> ParticipantId;
}

/// Random UUID v4 identities in simple (hyphenless) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidParticipantIdGenerator;

impl ParticipantIdGenerator for UuidParticipantIdGenerator {
    fn generate(&self) -> ParticipantId {
        ParticipantId(Uuid::new_v4().simple().to_string())
    }
}

/// Generates message ids unique within the process: the creation time and a
/// process-wide sequence number, both in base 36.
#[derive(Debug, Default)]
pub struct MessageIdFactory {
    sequence: AtomicU64,
}

impl MessageIdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self, created_at: Timestamp) -> MessageId {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = u64::try_from(created_at.value()).unwrap_or_default();
        MessageId(format!("{}-{}", to_base36(millis), to_base36(seq)))
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
