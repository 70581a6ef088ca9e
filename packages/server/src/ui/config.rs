//! Server configuration.

use std::time::Duration;

use crate::domain::DEFAULT_HISTORY_CAPACITY;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;
/// Number of recent messages replayed in `welcome`
pub const DEFAULT_WELCOME_HISTORY_LEN: usize = 10;

/// Runtime configuration of the broadcaster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Period of the liveness sweep
    pub sweep_interval: Duration,
    /// Number of messages kept in history
    pub history_capacity: usize,
    pub welcome_history_len: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            welcome_history_len: DEFAULT_WELCOME_HISTORY_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定が元の挙動（ポート 3000、30 秒ごとの sweep、履歴 100 件）と一致する
        // given (前提条件) / when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.welcome_history_len, 10);
    }
}
