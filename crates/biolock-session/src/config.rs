//! Session configuration
//!
//! Covers the two things an embedding application tunes: whether the
//! session may offer a settings redirect, and the display strings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use biolock_core::MessageTable;

/// Configuration for an authentication session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Offer to redirect the user to system settings when biometry is not
    /// enrolled or no passcode is set. When disabled those failures show a
    /// plain retry alert instead.
    pub allow_settings_redirect: bool,

    /// Display strings; any field left out of an override keeps its
    /// English default.
    pub messages: MessageTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            allow_settings_redirect: true,
            messages: MessageTable::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file, failing on any problem
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON file.
    ///
    /// Returns the default configuration if the file is missing or can't
    /// be parsed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load session config: {}", e);
                Self::default()
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert!(config.allow_settings_redirect);
        assert_eq!(config.messages.try_again, "Try Again");
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = SessionConfig::default();
        config.allow_settings_redirect = false;
        config.messages.user_fallback = "Use PIN".to_string();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SessionConfig = serde_json::from_str(&json).unwrap();

        assert!(!parsed.allow_settings_redirect);
        assert_eq!(parsed.messages.user_fallback, "Use PIN");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biolock.json");

        std::fs::write(
            &path,
            r#"{"allow_settings_redirect": false, "messages": {"try_again": "Retry"}}"#,
        )
        .unwrap();

        let config = SessionConfig::load(&path);
        assert!(!config.allow_settings_redirect);
        assert_eq!(config.messages.try_again, "Retry");
        // Untouched fields keep their defaults
        assert_eq!(config.messages.settings, "Settings");
    }

    #[test]
    fn test_load_missing_or_corrupt_falls_back() {
        let dir = tempfile::tempdir().unwrap();

        let config = SessionConfig::load(dir.path().join("absent.json"));
        assert!(config.allow_settings_redirect);

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        let config = SessionConfig::load(&corrupt);
        assert!(config.allow_settings_redirect);

        assert!(SessionConfig::from_file(&corrupt).is_err());
    }
}
