// ABOUTME: Configuration file loading, validation, and hierarchical merging for Imgur CLI
// ABOUTME: Supports TOML config files with XDG locations and environment variable overrides

use anyhow::{anyhow, Context, Result};
use imgur_sdk::constants::timeouts;
use imgur_sdk::{ImgurClient, ImgurClientConfig};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{env, files, formats};

const USER_AGENT: &str = concat!("imgur-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub rapidapi_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default, deserialize_with = "validate_format")]
    pub preferred_format: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Config")
            .field("client_id", &redact(&self.client_id))
            .field("rapidapi_key", &redact(&self.rapidapi_key))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("preferred_format", &self.preferred_format)
            .finish()
    }
}

impl Config {
    /// Load configuration from standard XDG-compliant locations, then the environment
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        let config = Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())?;
        Ok(config.with_env_overrides())
    }

    /// Load configuration from specific file paths in order of precedence
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        // Walk from lowest precedence so earlier paths override later ones
        for path in paths.iter().rev() {
            if !Path::new(path).exists() {
                continue;
            }
            let file_config = Self::load_from_file(path)?;
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(files::PROJECT_CONFIG)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(files::APP_DIR)
                .join(files::USER_CONFIG);
            paths.push(path.to_string_lossy().to_string());
        }

        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join(files::APP_DIR)
                .join(files::USER_CONFIG);
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            client_id: other.client_id.or(self.client_id),
            rapidapi_key: other.rapidapi_key.or(self.rapidapi_key),
            api_url: other.api_url.or(self.api_url),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            preferred_format: other.preferred_format.or(self.preferred_format),
        }
    }

    /// Credentials from `IMGUR_CLIENT_ID` and `IMGUR_RAPIDAPI_KEY` replace file values
    pub fn with_env_overrides(self) -> Config {
        let from_env = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        };

        self.merge(Config {
            client_id: from_env(env::CLIENT_ID),
            rapidapi_key: from_env(env::RAPIDAPI_KEY),
            ..Default::default()
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Whether results should be printed as JSON when no flag says otherwise
    pub fn prefers_json(&self) -> bool {
        self.preferred_format.as_deref() == Some(formats::JSON)
    }

    /// Build an SDK client from this configuration
    pub fn build_client(&self) -> Result<ImgurClient> {
        let client_id = self.client_id.clone().ok_or_else(|| {
            anyhow!(
                "No Imgur Client-ID configured. Set {} or add client_id to {}",
                env::CLIENT_ID,
                files::PROJECT_CONFIG
            )
        })?;

        let config = ImgurClientConfig {
            client_id: secret(client_id),
            rapidapi_key: self.rapidapi_key.clone().map(secret),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(timeouts::HTTP_REQUEST_TIMEOUT),
            base_url: self.api_url.clone(),
            user_agent: USER_AGENT.to_string(),
            transport: None,
        };

        ImgurClient::from_config(config).context("Failed to create Imgur client")
    }
}

fn secret(value: String) -> SecretString {
    SecretString::new(value.into_boxed_str())
}

// Custom deserializer for format validation
fn validate_format<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    match value {
        Some(ref format) if !formats::ALL.contains(&format.as_str()) => {
            Err(D::Error::custom(format!(
                "Invalid format '{}'. Must be one of: {}",
                format,
                formats::ALL.join(", ")
            )))
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.client_id.is_none());
        assert!(!config.prefers_json());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            client_id: Some("base-id".to_string()),
            timeout_secs: Some(10),
            ..Default::default()
        };

        let override_config = Config {
            client_id: Some("override-id".to_string()),
            api_url: Some("https://proxy.example.com/3/".to_string()),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.client_id, Some("override-id".to_string()));
        assert_eq!(merged.timeout_secs, Some(10));
        assert_eq!(
            merged.api_url,
            Some("https://proxy.example.com/3/".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = Config {
            client_id: Some("very-secret".to_string()),
            rapidapi_key: Some("also-secret".to_string()),
            ..Default::default()
        };

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_build_client_requires_client_id() {
        let err = Config::default().build_client().unwrap_err();
        assert!(err.to_string().contains(env::CLIENT_ID));
    }

    #[test]
    fn test_build_client_applies_settings() {
        let config = Config {
            client_id: Some("abc".to_string()),
            api_url: Some("http://127.0.0.1:9999/3".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };

        let client = config.build_client().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9999/3/");
        assert!(!client.is_routed());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = Config {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
