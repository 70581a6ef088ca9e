//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RegistryError;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 生成した ID が全て既存の ID と衝突した
    #[error("Could not allocate a unique participant id after {0} attempts")]
    IdentityExhausted(usize),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
