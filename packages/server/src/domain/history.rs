//! Bounded history of recent chat messages.

use std::collections::VecDeque;

use super::ChatMessage;

/// Default number of records kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded, append-only, oldest-evicted sequence of chat messages.
///
/// Records are kept oldest-first. Appending at capacity evicts the oldest
/// record, so the buffer never holds more than `capacity` entries.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<ChatMessage>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when the buffer is full.
    pub fn append(&mut self, record: ChatMessage) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// The last `n` records, oldest-first. `n` is capped to the current size.
    pub fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageContent, MessageId, ParticipantId, Timestamp};

    fn create_test_message(seq: usize) -> ChatMessage {
        let participant_id = ParticipantId::new("alice".to_string()).unwrap();
        ChatMessage::new(
            MessageId::new(format!("m{}", seq)).unwrap(),
            participant_id.clone(),
            DisplayName::default_for(&participant_id),
            MessageContent::new(format!("message {}", seq)),
            Timestamp::new(seq as i64),
        )
    }

    #[test]
    fn test_new_buffer_is_empty() {
        // テスト項目: 作成直後のバッファは空である
        // given (前提条件):
        let buffer = HistoryBuffer::default();

        // when (操作):
        let recent = buffer.recent(10);

        // then (期待する結果):
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), DEFAULT_HISTORY_CAPACITY);
        assert!(recent.is_empty());
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        // テスト項目: 追加したメッセージが古い順に保持される
        // given (前提条件):
        let mut buffer = HistoryBuffer::default();

        // when (操作):
        for seq in 0..3 {
            buffer.append(create_test_message(seq));
        }

        // then (期待する結果):
        let contents: Vec<String> = buffer
            .recent(3)
            .into_iter()
            .map(|m| m.content.into_string())
            .collect();
        assert_eq!(contents, vec!["message 0", "message 1", "message 2"]);
    }

    #[test]
    fn test_append_150_messages_keeps_last_100() {
        // テスト項目: 150 件追加すると最新 100 件だけが古い順に残る
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(100);

        // when (操作):
        for seq in 0..150 {
            buffer.append(create_test_message(seq));
        }

        // then (期待する結果):
        assert_eq!(buffer.len(), 100);
        let recent = buffer.recent(100);
        assert_eq!(recent.len(), 100);
        for (offset, message) in recent.iter().enumerate() {
            assert_eq!(message.message_id.as_str(), format!("m{}", offset + 50));
        }
    }

    #[test]
    fn test_recent_is_capped_to_current_size() {
        // テスト項目: 保持件数より大きい n を指定しても保持件数分だけ返る
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(100);
        buffer.append(create_test_message(1));
        buffer.append(create_test_message(2));

        // when (操作):
        let recent = buffer.recent(20);

        // then (期待する結果):
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message_id.as_str(), "m1");
    }

    #[test]
    fn test_recent_returns_tail_oldest_first() {
        // テスト項目: recent(n) は末尾 n 件を古い順で返す
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(100);
        for seq in 0..5 {
            buffer.append(create_test_message(seq));
        }

        // when (操作):
        let recent = buffer.recent(2);

        // then (期待する結果):
        assert_eq!(recent[0].message_id.as_str(), "m3");
        assert_eq!(recent[1].message_id.as_str(), "m4");
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        // テスト項目: 容量 0 を指定しても最低 1 件は保持される
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(0);

        // when (操作):
        buffer.append(create_test_message(1));
        buffer.append(create_test_message(2));

        // then (期待する結果):
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.recent(1)[0].message_id.as_str(), "m2");
    }
}
