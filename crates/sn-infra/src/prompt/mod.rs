//! Completion prompt persistence adapters

mod file_repo;

pub use file_repo::{FileCompletionPromptRepository, DEFAULT_PROMPT_STATE_FILE};
