//! InMemory ClientRegistry 実装
//!
//! ドメイン層が定義する ClientRegistry trait の具体的な実装。
//! 名前の一意性と同時接続数の上限を、単一の Mutex の下でまとめて管理します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientHandle, ClientRegistry, RegistryError, UserName};

/// Default ceiling on simultaneous connections
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Default)]
struct RegistryState {
    clients: HashMap<UserName, ClientHandle>,
    /// Seats in use; counts connections still in the handshake as well
    occupancy: usize,
}

/// インメモリ ClientRegistry 実装
pub struct InMemoryClientRegistry {
    state: Mutex<RegistryState>,
    capacity: usize,
}

impl InMemoryClientRegistry {
    /// 新しい InMemoryClientRegistry を作成
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            capacity,
        }
    }
}

impl Default for InMemoryClientRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn try_reserve_slot(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.occupancy >= self.capacity {
            return false;
        }
        state.occupancy += 1;
        true
    }

    async fn release_slot(&self) {
        let mut state = self.state.lock().await;
        state.occupancy = state.occupancy.saturating_sub(1);
    }

    async fn register(
        &self,
        name: String,
        handle: ClientHandle,
    ) -> Result<UserName, RegistryError> {
        let name = UserName::new(name)?;

        let mut state = self.state.lock().await;
        if state.clients.contains_key(&name) {
            return Err(RegistryError::NameTaken(name.to_string()));
        }
        state.clients.insert(name.clone(), handle);
        tracing::debug!("Registered '{}' ({} seats in use)", name, state.occupancy);

        Ok(name)
    }

    async fn unregister(&self, name: &UserName) {
        let mut state = self.state.lock().await;
        if state.clients.remove(name).is_some() {
            state.occupancy = state.occupancy.saturating_sub(1);
            tracing::debug!("Unregistered '{}' ({} seats in use)", name, state.occupancy);
        }
    }

    #[cfg(test)]
    async fn lookup(&self, name: &UserName) -> Option<ClientHandle> {
        let state = self.state.lock().await;
        state.clients.get(name).cloned()
    }

    async fn names(&self) -> Vec<UserName> {
        let state = self.state.lock().await;
        let mut names: Vec<UserName> = state.clients.keys().cloned().collect();
        names.sort();
        names
    }

    async fn occupancy(&self) -> usize {
        self.state.lock().await.occupancy
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
