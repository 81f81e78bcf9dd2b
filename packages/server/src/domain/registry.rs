//! ClientRegistry trait 定義
//!
//! 接続中クライアントの名前と接続ハンドル、および同時接続数を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{ClientHandle, RegistryError, UserName};

/// Client Registry trait
///
/// Membership bookkeeping only: implementations never write to a client.
/// Every method must be atomic with respect to every other method.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Reserve a seat for a new connection; `false` when the room is full
    async fn try_reserve_slot(&self) -> bool;

    /// Give back a seat reserved by a connection that never registered a name
    async fn release_slot(&self);

    /// Register `name` for the connection `handle`
    async fn register(&self, name: String, handle: ClientHandle)
    -> Result<UserName, RegistryError>;

    /// Remove `name` and give back its seat; no-op when absent
    async fn unregister(&self, name: &UserName);

    /// Connection handle registered under `name`
    #[cfg(test)]
    async fn lookup(&self, name: &UserName) -> Option<ClientHandle>;

    /// Registered names, sorted
    async fn names(&self) -> Vec<UserName>;

    /// Seats in use, including connections still choosing a name
    async fn occupancy(&self) -> usize;

    fn capacity(&self) -> usize;
}
