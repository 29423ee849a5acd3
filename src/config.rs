use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::gemini::DEFAULT_MODEL;
use crate::{Error, Result};

/// Configuration for the content-research core.
///
/// Credentials live here as plain values and are threaded into each call as
/// parameters; nothing in the core caches them, so replacing the config (or
/// just one key) takes effect on the next request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Video-data provider settings
    #[serde(default)]
    pub youtube: YouTubeConfig,

    /// AI analysis collaborator settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// API key for the video-data provider
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// API key for the AI collaborator
    pub api_key: String,

    /// Model used for analysis and outline generation
    pub model: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Build configuration from environment variables, starting from defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("VIRAL_SCOUT_YOUTUBE_API_KEY") {
            config.youtube.api_key = api_key;
        }

        if let Ok(timeout) = std::env::var("VIRAL_SCOUT_TIMEOUT_SECONDS") {
            config.youtube.timeout_seconds = timeout.parse().unwrap_or(30);
        }

        if let Ok(api_key) = std::env::var("VIRAL_SCOUT_GEMINI_API_KEY") {
            config.analysis.api_key = api_key;
        }

        if let Ok(model) = std::env::var("VIRAL_SCOUT_GEMINI_MODEL") {
            config.analysis.model = model;
        }

        config
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("cannot write {}: {}", path.display(), e)))?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.youtube.api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        if self.youtube.timeout_seconds == 0 {
            return Err(Error::Config(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.analysis.model.is_empty() {
            return Err(Error::Config("analysis model must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.youtube.api_key.is_empty());
        assert_eq!(config.youtube.timeout_seconds, 30);
        assert_eq!(config.analysis.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_validation_requires_video_credential() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(Error::MissingCredential)));

        let mut config = Config::default();
        config.youtube.api_key = "key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = Config::default();
        config.youtube.api_key = "key".to_string();
        config.youtube.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_parses_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [youtube]
            api_key = "yt-key"
            timeout_seconds = 10

            [analysis]
            api_key = "gemini-key"
            model = "gemini-3-pro-preview"
            "#,
        )
        .unwrap();

        assert_eq!(config.youtube.api_key, "yt-key");
        assert_eq!(config.youtube.timeout_seconds, 10);
        assert_eq!(config.analysis.api_key, "gemini-key");
    }
}
