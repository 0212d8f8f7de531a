//! File-based completion prompt repository
//!
//! Persists the one-time completion prompt state to a local JSON file in
//! the application data directory.

use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use sn_core::ports::CompletionPromptPort;
use sn_core::prompt::CompletionPromptState;

pub const DEFAULT_PROMPT_STATE_FILE: &str = ".completion_prompt";

pub struct FileCompletionPromptRepository {
    state_file_path: PathBuf,
}

impl FileCompletionPromptRepository {
    /// Create repository with custom file path
    pub fn new(state_file_path: PathBuf) -> Self {
        Self { state_file_path }
    }

    /// Create repository with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            state_file_path: base_dir.join(filename.into()),
        }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            state_file_path: base_dir.join(DEFAULT_PROMPT_STATE_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.state_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionPromptPort for FileCompletionPromptRepository {
    async fn get_state(&self) -> anyhow::Result<CompletionPromptState> {
        let content = match fs::read_to_string(&self.state_file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CompletionPromptState::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "read prompt state failed: {}",
                        self.state_file_path.display()
                    )
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(CompletionPromptState::default());
        }

        let state: CompletionPromptState = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse prompt state: {e}"))?;

        Ok(state)
    }

    async fn set_state(&self, state: &CompletionPromptState) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| anyhow::anyhow!("Failed to serialize prompt state: {e}"))?;

        let mut file = fs::File::create(&self.state_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create prompt state file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write prompt state file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync prompt state file: {e}"))?;

        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.state_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!(
                    "remove prompt state failed: {}",
                    self.state_file_path.display()
                )
            }),
        }
    }
}
