//! Extraction settings.
//!
//! The defaults describe the standard MedPC export layout. Labs that rename
//! their exports or re-indent them can override the relevant knobs from a
//! JSON file; any key missing from the file keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read settings file: {0}")]
    ReadError(String),

    /// Failed to write the settings file
    #[error("Failed to write settings file: {0}")]
    WriteError(String),

    /// Settings file is not valid JSON for this schema
    #[error("Failed to parse settings: {0}")]
    ParseError(String),
}

/// Knobs controlling file selection and block parsing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Data files must start with this prefix
    pub file_prefix: String,
    /// Data files must have this extension (compared case-insensitively)
    pub file_extension: String,
    /// Phrase that opens every session block
    pub session_header: String,
    /// Label preceding the subject identifier
    pub subject_label: String,
    /// Minimum number of leading spaces on a section payload line
    pub payload_indent: usize,
    /// Decode session blocks on the rayon pool
    pub parallel: bool,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            file_prefix: "!".to_string(),
            file_extension: "txt".to_string(),
            session_header: "Start Date:".to_string(),
            subject_label: "Subject:".to_string(),
            payload_indent: 4,
            parallel: true,
        }
    }
}

impl ExtractSettings {
    /// Parse settings from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(content).map_err(|e| SettingsError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make block splitting or section scanning degenerate
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.payload_indent == 0 {
            return Err(SettingsError::ParseError(
                "payload_indent must be at least 1".to_string(),
            ));
        }
        for (key, value) in [
            ("session_header", &self.session_header),
            ("subject_label", &self.subject_label),
        ] {
            if value.trim().is_empty() {
                return Err(SettingsError::ParseError(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::ReadError(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&content)?;
        tracing::info!("Loaded extraction settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to a JSON file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::WriteError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| SettingsError::WriteError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Whether a file name matches the configured prefix and extension
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        if !file_name.starts_with(&self.file_prefix) {
            return false;
        }
        let suffix = format!(".{}", self.file_extension.to_lowercase());
        file_name.to_lowercase().ends_with(&suffix)
    }
}
