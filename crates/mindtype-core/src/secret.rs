//! Secret configuration for the generative-service credential.
//!
//! Supports reading secrets from `~/.config/mindtype/secret.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MindTypeError, Result};

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the secret configuration file from ~/.config/mindtype/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    load_secret_config_from(&secret_config_path()?)
}

/// Loads a secret configuration file from an explicit path.
pub fn load_secret_config_from(path: &Path) -> Result<SecretConfig> {
    if !path.exists() {
        return Err(MindTypeError::config(format!(
            "Configuration file not found at: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        MindTypeError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        MindTypeError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/mindtype/secret.json
fn secret_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MindTypeError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("mindtype").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_secret_config_from(&dir.path().join("secret.json")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_load_valid_secret_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"gemini": {{"api_key": "test-key", "model_name": "gemini-2.5-flash"}}}}"#
        )
        .unwrap();

        let config = load_secret_config_from(&path).unwrap();
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "test-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.5-flash"));
    }

    #[test]
    fn test_load_malformed_secret_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, "not json").unwrap();

        let err = load_secret_config_from(&path).unwrap_err();
        assert!(err.is_config());
    }
}
