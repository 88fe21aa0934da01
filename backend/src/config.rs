//! Configuration management for the Crop Advisor server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (including the bare `API_KEY` variable)
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CROP_ADVISOR__ prefix (e.g. CROP_ADVISOR__GEMINI__API_KEY)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Generative model configuration
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key. Not checked at startup; a bad key fails the first request.
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Base URL of the Generative Language API
    pub base_url: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ADVISOR_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let bare_api_key = std::env::var("API_KEY").unwrap_or_default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.api_key", bare_api_key)?
            .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?
            .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ADVISOR__ prefix)
            .add_source(
                Environment::with_prefix("CROP_ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_defaults() {
        let gemini = GeminiConfig::new("test-key");
        assert_eq!(gemini.api_key, "test-key");
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert!(gemini.base_url.ends_with("/v1beta"));
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 3000);
        assert_eq!(server.host, "0.0.0.0");
    }

    // The only test touching process env; Config::load reads it directly.
    #[test]
    fn test_prefixed_api_key_overrides_bare_key() {
        std::env::remove_var("CROP_ADVISOR__GEMINI__API_KEY");
        std::env::set_var("API_KEY", "bare-key");
        let config = Config::load().unwrap();
        assert_eq!(config.gemini.api_key, "bare-key");
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);

        std::env::set_var("CROP_ADVISOR__GEMINI__API_KEY", "prefixed-key");
        let config = Config::load().unwrap();
        assert_eq!(config.gemini.api_key, "prefixed-key");

        std::env::remove_var("CROP_ADVISOR__GEMINI__API_KEY");
        std::env::remove_var("API_KEY");
    }
}
