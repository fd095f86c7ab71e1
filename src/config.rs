//! Application configuration loaded from environment variables.
//!
//! The API key is optional: without it the AI surfaces run in their
//! failure mode (fallback advice text, no meal suggestions).

use std::env;
use std::path::PathBuf;

/// Default Gemini model used for advice and meal plans.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL for the Generative Language API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable storage slots
    pub data_dir: PathBuf,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API base URL (overridable for local proxies)
    pub gemini_base_url: String,

    // --- Secrets ---
    /// Gemini API key
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        if !gemini_base_url.starts_with("http://") && !gemini_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "GEMINI_BASE_URL",
                reason: "must be an http(s) URL".to_string(),
            });
        }

        Ok(Self {
            data_dir: env::var("VERTEX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./vertex-data")),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: gemini_base_url.trim_end_matches('/').to_string(),
            gemini_api_key,
        })
    }

    /// Config for tests: no API key, data under the system temp directory.
    pub fn test_default() -> Self {
        Self {
            data_dir: env::temp_dir().join("vertex-tracker-test"),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_api_key: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("VERTEX_DATA_DIR", "/tmp/vertex-config-test");
        env::set_var("GEMINI_API_KEY", "  test_key  ");
        env::set_var("GEMINI_BASE_URL", "http://localhost:9999/v1beta/");
        env::remove_var("GEMINI_MODEL");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/vertex-config-test"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.gemini_base_url, "http://localhost:9999/v1beta");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);

        env::set_var("GEMINI_BASE_URL", "ftp://example.com");
        let result = Config::from_env();
        env::remove_var("GEMINI_BASE_URL");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "GEMINI_BASE_URL",
                ..
            })
        ));
    }

    #[test]
    fn test_default_has_no_api_key() {
        let config = Config::test_default();
        assert!(config.gemini_api_key.is_none());
    }
}
