//! Completion prompt use cases
//!
//! After a successful registration the member lands on their dashboard
//! with a mostly-empty profile. A one-time prompt nudges them to finish
//! it; these use cases read and advance the persisted "already shown"
//! flag behind that prompt.

pub mod get_state;
pub mod mark_shown;

pub use get_state::GetCompletionPrompt;
pub use mark_shown::MarkCompletionPromptShown;

/// Data transfer object for the completion prompt state
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompletionPromptDto {
    pub has_shown: bool,
}
