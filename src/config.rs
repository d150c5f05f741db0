//! Application configuration.
//!
//! Configuration is stored in `matchform.yaml` in the working directory and includes:
//! - The player search gateway's base URL and its two search paths
//! - Search picker behavior (debounce, option cap)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MatchformError, Result};
use crate::gateway::roster::SEARCH_RESULT_LIMIT;
use crate::gateway::{DEFAULT_SEARCH_JSON_PATH, DEFAULT_SEARCH_PATH, EndpointKind, SearchEndpoint};

/// Default config file name, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "matchform.yaml";

/// Environment variable overriding `gateway.base_url`
pub const BASE_URL_ENV: &str = "MATCHFORM_BASE_URL";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "gateway.base_url",
    "gateway.search_json_path",
    "gateway.search_path",
    "gateway.timeout_secs",
    "picker.debounce_ms",
    "picker.max_options",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search gateway location
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Search picker behavior
    #[serde(default)]
    pub picker: PickerConfig,
}

/// Search gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the JSON-suffixed search endpoint
    #[serde(default = "default_search_json_path")]
    pub search_json_path: String,

    /// Path of the plain search endpoint
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Overall request timeout; unset leaves the transport defaults in place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_search_json_path() -> String {
    DEFAULT_SEARCH_JSON_PATH.to_string()
}

fn default_search_path() -> String {
    DEFAULT_SEARCH_PATH.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_json_path: default_search_json_path(),
            search_path: default_search_path(),
            timeout_secs: None,
        }
    }
}

impl GatewayConfig {
    /// Base URL, preferring the `MATCHFORM_BASE_URL` environment variable
    pub fn resolved_base_url(&self) -> String {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.base_url.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the configured path for an endpoint kind
    pub fn endpoint(&self, kind: EndpointKind) -> Result<SearchEndpoint> {
        match kind {
            EndpointKind::Json => SearchEndpoint::parse(&self.search_json_path),
            EndpointKind::Plain => SearchEndpoint::parse(&self.search_path),
        }
    }
}

/// Search picker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Delay before a typed query is sent (0 = send immediately)
    #[serde(default)]
    pub debounce_ms: u64,

    /// Maximum number of options shown at once
    #[serde(default = "default_max_options")]
    pub max_options: usize,
}

fn default_max_options() -> usize {
    SEARCH_RESULT_LIMIT
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 0,
            max_options: default_max_options(),
        }
    }
}

impl PickerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MatchformError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            MatchformError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Read a single value by dot-notation key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "gateway.base_url" => self.gateway.base_url.clone(),
            "gateway.search_json_path" => self.gateway.search_json_path.clone(),
            "gateway.search_path" => self.gateway.search_path.clone(),
            "gateway.timeout_secs" => match self.gateway.timeout_secs {
                Some(secs) => secs.to_string(),
                None => return Err(MatchformError::Config(format!("{key} is not set"))),
            },
            "picker.debounce_ms" => self.picker.debounce_ms.to_string(),
            "picker.max_options" => self.picker.max_options.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single value by dot-notation key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "gateway.base_url" => {
                let url = Url::parse(value)?;
                if url.cannot_be_a_base() {
                    return Err(MatchformError::Config(format!(
                        "'{value}' cannot be used as a base URL"
                    )));
                }
                self.gateway.base_url = value.to_string();
            }
            "gateway.search_json_path" => {
                self.gateway.search_json_path = SearchEndpoint::parse(value)?.path().to_string();
            }
            "gateway.search_path" => {
                self.gateway.search_path = SearchEndpoint::parse(value)?.path().to_string();
            }
            "gateway.timeout_secs" => {
                self.gateway.timeout_secs = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(parse_number(key, value)?)
                };
            }
            "picker.debounce_ms" => {
                self.picker.debounce_ms = parse_number(key, value)?;
            }
            "picker.max_options" => {
                let max: usize = parse_number(key, value)?;
                if max == 0 {
                    return Err(MatchformError::Config(
                        "picker.max_options must be at least 1".to_string(),
                    ));
                }
                self.picker.max_options = max;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        MatchformError::Config(format!("invalid value '{value}' for {key}: expected a number"))
    })
}

fn unknown_key(key: &str) -> MatchformError {
    MatchformError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://localhost:8080");
        assert_eq!(config.gateway.search_json_path, DEFAULT_SEARCH_JSON_PATH);
        assert_eq!(config.gateway.search_path, DEFAULT_SEARCH_PATH);
        assert_eq!(config.gateway.timeout(), None);
        assert_eq!(config.picker.debounce(), Duration::ZERO);
        assert_eq!(config.picker.max_options, 10);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "gateway:\n  base_url: https://ranks.example.com\n  timeout_secs: 5\npicker:\n  debounce_ms: 250\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gateway.base_url, "https://ranks.example.com");
        assert_eq!(config.gateway.search_path, DEFAULT_SEARCH_PATH);
        assert_eq!(config.gateway.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.picker.debounce_ms, 250);
        assert_eq!(config.picker.max_options, 10);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "gateway: [not, a, map]\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(MatchformError::YamlParse(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.set("gateway.search_path", "/players/find").unwrap();
        config.set("picker.debounce_ms", "120").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("gateway.base_url", "https://ranks.example.com").unwrap();
        config.set("gateway.timeout_secs", "15").unwrap();
        config.set("picker.max_options", "25").unwrap();

        assert_eq!(config.get("gateway.base_url").unwrap(), "https://ranks.example.com");
        assert_eq!(config.get("gateway.timeout_secs").unwrap(), "15");
        assert_eq!(config.get("picker.max_options").unwrap(), "25");

        config.set("gateway.timeout_secs", "none").unwrap();
        assert!(config.get("gateway.timeout_secs").is_err());
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("gateway.base_url", "not a url").is_err());
        assert!(config.set("gateway.search_path", "no-leading-slash").is_err());
        assert!(config.set("picker.debounce_ms", "soon").is_err());
        assert!(config.set("picker.max_options", "0").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        let err = config.set("gateway.port", "80").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
        assert!(config.get("picker.color").is_err());
    }

    #[test]
    fn test_endpoint_kinds() {
        let config = GatewayConfig::default();
        assert_eq!(
            config.endpoint(EndpointKind::Json).unwrap().path(),
            DEFAULT_SEARCH_JSON_PATH
        );
        assert_eq!(
            config.endpoint(EndpointKind::Plain).unwrap().path(),
            DEFAULT_SEARCH_PATH
        );
    }

    #[test]
    #[serial]
    fn test_base_url_env_override() {
        let config = GatewayConfig::default();

        // SAFETY: serialised with other env-mutating tests
        unsafe { env::set_var(BASE_URL_ENV, "http://127.0.0.1:9999") };
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:9999");

        unsafe { env::remove_var(BASE_URL_ENV) };
        assert_eq!(config.resolved_base_url(), "http://localhost:8080");
    }
}
