//! In-memory bearer token store
//!
//! The token lives for the process lifetime only; restarting the client
//! means logging in again.

use async_trait::async_trait;
use tokio::sync::Mutex;

use sn_core::ports::TokenStorePort;
use sn_core::session::SessionToken;

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorePort for MemoryTokenStore {
    async fn get(&self) -> anyhow::Result<Option<SessionToken>> {
        Ok(self.token.lock().await.clone())
    }

    async fn set(&self, token: &SessionToken) -> anyhow::Result<()> {
        *self.token.lock().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}
