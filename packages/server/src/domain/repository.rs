//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::ChatMessage;

/// History Repository trait
///
/// 直近のチャットメッセージを保持するストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// メッセージを追加（容量を超えた場合は最も古いものを破棄）
    async fn append(&self, message: ChatMessage);

    /// 直近 n 件のメッセージを古い順に取得
    async fn recent(&self, n: usize) -> Vec<ChatMessage>;

    /// 保持しているメッセージ数を取得
    async fn count(&self) -> usize;
}
