//! Configuration loading for bookfinder
//!
//! Configuration is loaded from:
//! 1. An explicit path (`--config`)
//! 2. Environment variable BOOKFINDER_CONFIG_PATH
//! 3. ~/.bookfinder/config.toml
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::{BookFinderError, Result};

/// Google Books caps `maxResults` at 40
pub const MAX_RESULTS_LIMIT: usize = 40;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Catalog endpoints and request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
    #[serde(default = "default_volume_endpoint")]
    pub volume_endpoint: String,
    /// Result-count cap sent with every search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional Google API key, sent as `key=`
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Hosts whose cover images may be shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

// Default value functions
fn default_search_endpoint() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

fn default_volume_endpoint() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("bookfinder/{}", env!("CARGO_PKG_VERSION"))
}

fn default_allowed_hosts() -> Vec<String> {
    vec!["books.google.com".to_string()]
}

fn default_placeholder() -> String {
    "Search for a book...".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_endpoint: default_search_endpoint(),
            volume_endpoint: default_volume_endpoint(),
            max_results: default_max_results(),
            user_agent: default_user_agent(),
            api_key: None,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: default_allowed_hosts(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

impl ImagesConfig {
    /// Whether a cover URL points at an allowlisted host
    pub fn is_allowed(&self, image_url: &str) -> bool {
        let Ok(url) = Url::parse(image_url) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        self.allowed_hosts
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(host))
    }
}

impl Config {
    /// Load configuration from `path`, the environment, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(Self::find_config_path);

        let config = match config_path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::info!("No config path available, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.max_results == 0 || self.api.max_results > MAX_RESULTS_LIMIT {
            return Err(BookFinderError::Config(format!(
                "api.max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, self.api.max_results
            )));
        }

        for (name, endpoint) in [
            ("api.search_endpoint", &self.api.search_endpoint),
            ("api.volume_endpoint", &self.api.volume_endpoint),
        ] {
            Url::parse(endpoint)
                .map_err(|e| BookFinderError::Config(format!("{} '{}': {}", name, endpoint, e)))?;
        }

        Ok(())
    }

    /// Directory holding the config file and the TUI log
    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".bookfinder"))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("BOOKFINDER_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        Self::config_dir().map(|dir| dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_public_catalog() {
        let config = Config::default();
        assert_eq!(config.api.max_results, 10);
        assert_eq!(
            config.api.search_endpoint,
            "https://www.googleapis.com/books/v1/volumes"
        );
        assert_eq!(config.images.allowed_hosts, vec!["books.google.com"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nmax_results = 20\napi_key = \"abc\"\n\n[ui]\nplaceholder = \"Title...\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.max_results, 20);
        assert_eq!(config.api.api_key.as_deref(), Some("abc"));
        assert_eq!(config.ui.placeholder, "Title...");
        assert_eq!(config.images.allowed_hosts, vec!["books.google.com"]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.api.max_results, 10);
    }

    #[test]
    fn out_of_range_cap_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nmax_results = 0").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, BookFinderError::Config(_)));
    }

    #[test]
    fn image_allowlist_checks_the_host() {
        let images = ImagesConfig::default();
        assert!(images.is_allowed("http://books.google.com/books/content?id=X&printsec=frontcover"));
        assert!(!images.is_allowed("https://evil.example/cover.png"));
        assert!(!images.is_allowed(""));
    }
}
