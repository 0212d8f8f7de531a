//! JSON message catalog
//!
//! A flat key to text mapping per language, loaded once at startup.
//! Missing keys resolve to the caller-supplied fallback, so an absent or
//! sparse catalog degrades to the built-in English text instead of
//! failing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use sn_core::config::LocaleConfig;
use sn_core::ports::LocalizerPort;

#[derive(Debug)]
pub struct JsonCatalog {
    messages: HashMap<String, String>,
}

impl JsonCatalog {
    /// A catalog with no entries; every lookup falls back.
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Load one language section from a catalog file shaped
    /// `{ "<language>": { "<key>": "<text>" } }`.
    pub fn from_file(path: &Path, language: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read message catalog failed: {}", path.display()))?;

        let mut catalog: HashMap<String, HashMap<String, String>> = serde_json::from_str(&content)
            .with_context(|| format!("parse message catalog failed: {}", path.display()))?;

        let messages = catalog.remove(language).unwrap_or_else(|| {
            warn!(language, "message catalog has no section for language");
            HashMap::new()
        });

        Ok(Self { messages })
    }

    /// Build from configuration; no catalog path means an empty catalog.
    pub fn from_config(locale: &LocaleConfig) -> anyhow::Result<Self> {
        match &locale.catalog_path {
            Some(path) => Self::from_file(path, &locale.language),
            None => Ok(Self::empty()),
        }
    }
}

impl LocalizerPort for JsonCatalog {
    fn translate(&self, key: &str, fallback: &str) -> String {
        match self.messages.get(key) {
            Some(text) => text.clone(),
            None => fallback.to_string(),
        }
    }
}
