use crate::constants::*;
use crate::error::{Result, UnicornError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub companies_html: PathBuf,
    pub raw_csv: PathBuf,
    pub clean_csv: PathBuf,
    pub investments_csv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            companies_html: PathBuf::from(DEFAULT_COMPANIES_HTML),
            raw_csv: PathBuf::from(DEFAULT_RAW_CSV),
            clean_csv: PathBuf::from(DEFAULT_CLEAN_CSV),
            investments_csv: PathBuf::from(DEFAULT_INVESTMENTS_CSV),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `unicorn.toml` when no path is given.
    ///
    /// An explicitly requested file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !config_path.exists() {
            if required {
                return Err(UnicornError::Config(format!(
                    "Config file '{}' does not exist",
                    config_path.display()
                )));
            }
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            UnicornError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&config_content)?;
        info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [paths]
            raw_csv = "data/raw.csv"

            [http]
            timeout_seconds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.raw_csv, PathBuf::from("data/raw.csv"));
        assert_eq!(config.paths.clean_csv, PathBuf::from(DEFAULT_CLEAN_CSV));
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/unicorn.toml")));
        assert!(matches!(result, Err(UnicornError::Config(_))));
    }
}
