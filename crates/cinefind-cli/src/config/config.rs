//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable that overrides `tmdb.base_url`.
pub const BASE_URL_ENV: &str = "TMDB_BASE_URL";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB access configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL override (e.g. a local proxy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
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

    /// Picks the API key: `env_value` (from `TMDB_API_KEY`) first, then the file.
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source holds a non-blank key.
    pub fn api_key(&self, env_value: Option<String>) -> Result<String> {
        non_blank(env_value)
            .or_else(|| non_blank(self.tmdb.api_key.clone()))
            .with_context(|| {
                format!(
                    "TMDB API key is required: set {API_KEY_ENV} or run `cinefind config set-api-key`"
                )
            })
    }

    /// Picks the base URL override: `env_value` (from `TMDB_BASE_URL`) first,
    /// then the file. Blank values count as unset; `None` means the client default.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen value is not a valid URL.
    pub fn base_url(&self, env_value: Option<String>) -> Result<Option<Url>> {
        let Some(raw) = non_blank(env_value).or_else(|| non_blank(self.tmdb.base_url.clone()))
        else {
            return Ok(None);
        };
        // `Url::join` drops the last segment unless the base ends with '/'.
        let normalized = if raw.ends_with('/') {
            raw
        } else {
            format!("{raw}/")
        };
        let url = Url::parse(&normalized).with_context(|| format!("invalid base URL: {normalized}"))?;
        Ok(Some(url))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn with_key(key: &str) -> AppConfig {
        AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from(key)),
                base_url: None,
            },
        }
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert!(config.tmdb.base_url.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = with_key("abc123");

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[tmdb]"));
        assert!(!raw.contains("base_url"));
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\napi_key = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_env_overrides_file() {
        // Arrange
        let config = with_key("from-file");

        // Act & Assert
        assert_eq!(
            config.api_key(Some(String::from("from-env"))).unwrap(),
            "from-env"
        );
        assert_eq!(config.api_key(None).unwrap(), "from-file");
    }

    #[test]
    fn test_blank_api_key_env_falls_back_to_file() {
        // Arrange
        let config = with_key("from-file");

        // Act & Assert
        assert_eq!(config.api_key(Some(String::new())).unwrap(), "from-file");
        assert_eq!(
            config.api_key(Some(String::from("  "))).unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_api_key_missing_names_both_sources() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.api_key(Some(String::from("  "))).unwrap_err();

        // Assert
        let message = err.to_string();
        assert!(message.contains(API_KEY_ENV));
        assert!(message.contains("config set-api-key"));
    }

    #[test]
    fn test_base_url_adds_trailing_slash() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: None,
                base_url: Some(String::from("http://127.0.0.1:8080/3")),
            },
        };

        // Act
        let url = config.base_url(None).unwrap().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/3/");
    }

    #[test]
    fn test_blank_base_url_env_falls_back_to_file() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: None,
                base_url: Some(String::from("http://127.0.0.1:8080/3/")),
            },
        };

        // Act
        let url = config.base_url(Some(String::new())).unwrap().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/3/");
        assert!(AppConfig::default().base_url(Some(String::from(" "))).unwrap().is_none());
    }

    #[test]
    fn test_base_url_default_and_invalid() {
        // Arrange
        let config = AppConfig::default();

        // Act & Assert
        assert!(config.base_url(None).unwrap().is_none());
        assert!(config.base_url(Some(String::from("not a url"))).is_err());
    }
}
