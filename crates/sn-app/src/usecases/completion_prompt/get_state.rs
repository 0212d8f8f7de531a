use std::sync::Arc;

use sn_core::ports::CompletionPromptPort;

use super::CompletionPromptDto;

/// Use case for reading the completion prompt state.
///
/// Answers whether the profile-completion prompt has already been shown
/// to this member, so the surface shows it at most once.
pub struct GetCompletionPrompt {
    prompt_state: Arc<dyn CompletionPromptPort>,
}

impl GetCompletionPrompt {
    /// Create a new GetCompletionPrompt use case from trait objects.
    pub fn new(prompt_state: Arc<dyn CompletionPromptPort>) -> Self {
        Self { prompt_state }
    }

    /// Create a new GetCompletionPrompt use case from cloned Arc<dyn Port>
    /// references.
    pub fn from_ports(prompt_state: Arc<dyn CompletionPromptPort>) -> Self {
        Self::new(prompt_state)
    }

    /// Get the current prompt state.
    pub async fn execute(&self) -> anyhow::Result<CompletionPromptDto> {
        let state = self.prompt_state.get_state().await?;
        Ok(CompletionPromptDto {
            has_shown: state.has_shown,
        })
    }
}
