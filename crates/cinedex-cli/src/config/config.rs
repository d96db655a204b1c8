//! `AppConfig` struct, TOML read/write, and API key resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::paths::resolve_config_path;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// API authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// API authentication configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// TMDB API key, used when `TMDB_API_KEY` is not set.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Resolves the TMDB API key: a non-empty `TMDB_API_KEY` environment
/// value wins, otherwise the config file's `[auth] api_key` is used.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or no key is set.
pub fn resolve_api_key(dir: Option<&PathBuf>) -> Result<String> {
    resolve_api_key_from(std::env::var("TMDB_API_KEY").ok(), dir)
}

/// Applies the key precedence. The config file is only touched when the
/// environment does not provide a usable key.
fn resolve_api_key_from(env_key: Option<String>, dir: Option<&PathBuf>) -> Result<String> {
    if let Some(key) = env_key.filter(|key| !key.is_empty()) {
        return Ok(key);
    }

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    config
        .auth
        .api_key
        .filter(|key| !key.is_empty())
        .context("TMDB API key not found: set TMDB_API_KEY or [auth] api_key in config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            auth: AuthConfig {
                api_key: Some(String::from("abc123")),
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/cinedex_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            auth: AuthConfig {
                api_key: Some(String::from("k-123")),
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    fn save_key(dir: &Path, key: &str) {
        AppConfig {
            auth: AuthConfig {
                api_key: Some(String::from(key)),
            },
        }
        .save(&dir.join("config.toml"))
        .unwrap();
    }

    #[test]
    fn test_env_key_wins_over_config_key() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_buf = dir.path().to_path_buf();
        save_key(dir.path(), "from-config");

        // Act
        let key = resolve_api_key_from(Some(String::from("from-env")), Some(&dir_buf)).unwrap();

        // Assert
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_empty_env_key_falls_back_to_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_buf = dir.path().to_path_buf();
        save_key(dir.path(), "from-config");

        // Act
        let key = resolve_api_key_from(Some(String::new()), Some(&dir_buf)).unwrap();

        // Assert
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_env_key_skips_config_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_buf = dir.path().to_path_buf();
        std::fs::write(dir.path().join("config.toml"), "not toml at all {{{").unwrap();

        // Act
        let key = resolve_api_key_from(Some(String::from("from-env")), Some(&dir_buf)).unwrap();

        // Assert
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_missing_key_everywhere_is_an_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_buf = dir.path().to_path_buf();

        // Act
        let err = resolve_api_key_from(None, Some(&dir_buf)).unwrap_err();

        // Assert
        assert!(err.to_string().contains("TMDB API key not found"));
    }

    #[test]
    fn test_empty_config_key_is_an_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_buf = dir.path().to_path_buf();
        save_key(dir.path(), "");

        // Act & Assert
        assert!(resolve_api_key_from(None, Some(&dir_buf)).is_err());
    }
}
