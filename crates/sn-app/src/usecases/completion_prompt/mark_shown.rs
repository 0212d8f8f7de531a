use std::sync::Arc;

use sn_core::ports::CompletionPromptPort;

/// Use case for marking the completion prompt as shown.
///
/// Records in the persistent state that the member has seen the prompt.
pub struct MarkCompletionPromptShown {
    prompt_state: Arc<dyn CompletionPromptPort>,
}

impl MarkCompletionPromptShown {
    /// Create a new MarkCompletionPromptShown use case from trait objects.
    pub fn new(prompt_state: Arc<dyn CompletionPromptPort>) -> Self {
        Self { prompt_state }
    }

    /// Create a new MarkCompletionPromptShown use case from cloned
    /// Arc<dyn Port> references.
    pub fn from_ports(prompt_state: Arc<dyn CompletionPromptPort>) -> Self {
        Self::new(prompt_state)
    }

    /// Mark the prompt as shown.
    pub async fn execute(&self) -> anyhow::Result<()> {
        let mut state = self.prompt_state.get_state().await?;
        state.has_shown = true;
        self.prompt_state.set_state(&state).await
    }
}
