//! Completion prompt domain model
//!
//! After a successful registration the member is shown a one-time prompt
//! asking them to finish their profile. Whether it has already been shown
//! is the only piece of client-local persistent state in the product.

/// Completion prompt state persisted across app restarts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompletionPromptState {
    pub has_shown: bool,
}

impl Default for CompletionPromptState {
    fn default() -> Self {
        Self { has_shown: false }
    }
}
