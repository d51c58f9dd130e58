//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use openseoul_dataset::DEFAULT_PAGE_SIZE;

/// File-backed configuration for openseoul
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Dataset endpoint, access key and response format included
    pub base_url: Option<String>,
    /// Access key; `${VAR}` expands from the environment
    #[serde(deserialize_with = "deserialize_env_var")]
    pub auth_key: Option<String>,
    /// Expected top-level key of responses
    pub service: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_key: std::env::var("SEOUL_API_KEY").ok(),
            service: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub page_size: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("../data/raw_data"),
        }
    }
}

/// Deserialize a string that may reference an environment variable like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to its environment value; literals pass through.
fn expand_env_var(raw: &str) -> Option<String> {
    match raw.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
        Some(name) => std::env::var(name).ok(),
        None => Some(raw.to_string()),
    }
}

impl FileConfig {
    /// Load configuration from default locations.
    ///
    /// Search order:
    /// 1. ./openseoul.toml (current directory)
    /// 2. ~/.config/openseoul/config.toml
    ///
    /// Falls back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        let local = PathBuf::from("openseoul.toml");
        if local.exists() {
            return Self::from_file(&local);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "openseoul") {
            let user = dirs.config_dir().join("config.toml");
            if user.exists() {
                return Self::from_file(&user);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FileConfig::default();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.fetch.page_size, 1000);
        assert_eq!(config.output.dir, PathBuf::from("../data/raw_data"));
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal-key"), Some("literal-key".to_string()));
    }

    #[test]
    fn expand_env_var_set() {
        std::env::set_var("OPENSEOUL_TEST_VAR", "from-env");
        assert_eq!(
            expand_env_var("${OPENSEOUL_TEST_VAR}"),
            Some("from-env".to_string())
        );
        std::env::remove_var("OPENSEOUL_TEST_VAR");
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${OPENSEOUL_NO_SUCH_VAR_1234}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[api]
base_url = "http://openapi.seoul.go.kr:8088/KEY/json/VwsmTrdarSelngQq"
service = "VwsmTrdarSelngQq"

[fetch]
page_size = 500

[output]
dir = "/tmp/raw"
"#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://openapi.seoul.go.kr:8088/KEY/json/VwsmTrdarSelngQq")
        );
        assert_eq!(config.api.service.as_deref(), Some("VwsmTrdarSelngQq"));
        assert_eq!(config.fetch.page_size, 500);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/raw"));
    }
}
