//! Completion prompt port
//!
//! This port defines the contract for persisting and retrieving the
//! one-time completion prompt state. Implementations are provided by the
//! infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::prompt::CompletionPromptState;

#[async_trait]
pub trait CompletionPromptPort: Send + Sync {
    /// Get current prompt state
    async fn get_state(&self) -> anyhow::Result<CompletionPromptState>;

    /// Update prompt state
    async fn set_state(&self, state: &CompletionPromptState) -> anyhow::Result<()>;

    /// Reset the prompt (for testing or re-registration)
    async fn reset(&self) -> anyhow::Result<()>;

    /// Check if the prompt was already shown
    async fn has_shown(&self) -> anyhow::Result<bool> {
        Ok(self.get_state().await?.has_shown)
    }
}
