//! Studio configuration
//!
//! Small and declarative: which model the host should wire up, whether
//! previews start instrumented, and the in-memory caps. Loadable from
//! TOML with every field optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Session-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Model name the host should bind the provider to.
    pub model_name: String,
    /// Whether previews are assembled with inspection enabled.
    pub instrumented_preview: bool,
    /// Most history entries kept before the oldest is evicted.
    pub max_history_entries: usize,
    /// Most chat turns kept before the oldest is evicted.
    pub max_chat_turns: usize,
}

impl StudioConfig {
    /// Default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a model name.
    #[inline]
    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// With instrumented previews on or off.
    #[inline]
    #[must_use]
    pub fn with_instrumented_preview(mut self, instrumented: bool) -> Self {
        self.instrumented_preview = instrumented;
        self
    }

    /// With a history cap.
    #[inline]
    #[must_use]
    pub fn with_max_history_entries(mut self, max: usize) -> Self {
        self.max_history_entries = max;
        self
    }

    /// With a chat turn cap.
    #[inline]
    #[must_use]
    pub fn with_max_chat_turns(mut self, max: usize) -> Self {
        self.max_chat_turns = max;
        self
    }

    /// Parse a configuration from TOML text. Absent fields keep their
    /// defaults.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] when the text is not valid TOML for this
    /// shape.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] when its contents do not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            model_name: "gemini-2.5-flash".to_string(),
            instrumented_preview: true,
            max_history_entries: 50,
            max_chat_turns: 20,
        }
    }
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("configuration file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The contents are not valid configuration TOML.
    #[error("configuration parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}
