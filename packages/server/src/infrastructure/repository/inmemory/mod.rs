//! インメモリ Repository 実装

pub mod history;

pub use history::InMemoryHistoryRepository;
