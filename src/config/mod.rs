//! Configuration for the ucc front-end
//!
//! Values are layered: built-in defaults, then the first configuration file
//! found, then `UCC_*` environment variables, then command line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::menu::MenuLink;

/// Port the ucc web server binds by default
pub const DEFAULT_BASE_URL: &str = "http://localhost:8005";
pub const DEFAULT_WORDS_PATH: &str = "/ajax/words/get";
pub const DEFAULT_PACKAGES_PATH: &str = "/ajax/fs/examples";

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("Endpoint path for {field} must start with '/': {value}")]
    InvalidPath { field: &'static str, value: String },

    #[error("{0} must be greater than 0")]
    Zero(&'static str),

    #[error("Menu link '{0}' has an empty href")]
    EmptyHref(String),
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root, e.g. `http://localhost:8005`
    pub base_url: String,

    /// Word tree endpoint
    pub words_path: String,

    /// Package list endpoint
    pub packages_path: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Words expanded when the tree first loads
    pub initially_open: Vec<String>,

    /// Menu bar entries
    pub menu: Vec<MenuLink>,

    /// UI tick rate in milliseconds
    pub tick_rate_ms: u64,

    /// Enable mouse support
    pub mouse_enabled: bool,

    /// Directory for the log file
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            words_path: DEFAULT_WORDS_PATH.to_string(),
            packages_path: DEFAULT_PACKAGES_PATH.to_string(),
            request_timeout_secs: 10,
            initially_open: vec!["declaration".to_string()],
            menu: MenuLink::defaults(),
            tick_rate_ms: 250,
            mouse_enabled: true,
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("ucc-ide"))
                .unwrap_or_else(|| PathBuf::from("./.ucc-ide")),
        }
    }
}

impl Config {
    /// Initialize configuration from files and the environment
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_file(&Self::config_paths()).await? {
            Some(config) => config,
            None => Self::default(),
        };

        config.load_from_env();
        Ok(config)
    }

    /// Candidate configuration files, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.ucc-ide.json"),
            PathBuf::from("./ucc-ide.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ucc-ide").join("ucc-ide.json"));
        }

        paths
    }

    /// Load the first configuration file that exists
    pub async fn load_from_file(paths: &[PathBuf]) -> Result<Option<Self>> {
        for path in paths {
            if path.exists() {
                return Self::read_file(path).await.map(Some);
            }
        }
        Ok(None)
    }

    async fn read_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = var("UCC_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(path) = var("UCC_WORDS_PATH") {
            self.words_path = path;
        }

        if let Some(path) = var("UCC_PACKAGES_PATH") {
            self.packages_path = path;
        }

        if let Some(timeout) = var("UCC_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = timeout;
        }

        if let Some(data_dir) = var("UCC_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Default log file location
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("ucc-ide.log")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(self.base_url.clone(), e.to_string()))?;

        for (field, value) in [
            ("words_path", &self.words_path),
            ("packages_path", &self.packages_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    field,
                    value: value.clone(),
                });
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Zero("tick_rate_ms"));
        }

        if let Some(link) = self.menu.iter().find(|link| link.href.is_empty()) {
            return Err(ConfigError::EmptyHref(link.label.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://localhost:8005");
        assert_eq!(config.initially_open, vec!["declaration".to_string()]);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("UCC_BASE_URL", "http://ucc.test:9000"),
            ("UCC_PACKAGES_PATH", "/ajax/fs/packages"),
            ("UCC_REQUEST_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://ucc.test:9000");
        assert_eq!(config.packages_path, "/ajax/fs/packages");
        assert_eq!(config.words_path, DEFAULT_WORDS_PATH);
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn test_unparsable_timeout_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "UCC_REQUEST_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ucc-ide.json");
        std::fs::write(&path, r#"{ "base_url": "http://embedded:8005" }"#).unwrap();

        let config = Config::load_from_file(&[dir.path().join("missing.json"), path])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(config.base_url, "http://embedded:8005");
        assert_eq!(config.packages_path, DEFAULT_PACKAGES_PATH);
        assert_eq!(config.menu, MenuLink::defaults());
    }

    #[tokio::test]
    async fn test_no_file_found() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_from_file(&[dir.path().join("nope.json")]).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ucc-ide.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from_file(&[path]).await.is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(..))));

        let mut config = Config::default();
        config.words_path = "ajax/words/get".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPath { field: "words_path", .. })
        ));

        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero(_))));

        let mut config = Config::default();
        config.menu.push(MenuLink::new("Broken", ""));
        assert!(matches!(config.validate(), Err(ConfigError::EmptyHref(_))));
    }
}
