use anyhow::{bail, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::acronym::repository::DataSource;
use crate::acronym::fuzzy::DEFAULT_MAX_RESULTS;

/// Default config file name, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "tmdr.toml";

/// Environment variable naming a dataset CSV
pub const DATA_ENV_VAR: &str = "TMDR_DATA";

/// Main configuration structure loaded from tmdr.toml
#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub data: Option<DataConfig>,
    pub search: Option<SearchConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Deserialize, Debug)]
pub struct DataConfig {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SearchConfig {
    pub max_results: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct OutputConfig {
    pub color: Option<bool>,
}

/// Marker error so main can map config failures to their own exit code.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(pub String);

impl Config {
    /// Load config from file, or return default if no config exists.
    /// If an explicit path is provided via --config, it MUST exist (error if not).
    /// If no path is provided, check ./tmdr.toml (use default if not found).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!(ConfigError(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    default_path
                } else {
                    return Ok(Config::default());
                }
            }
        };

        let contents = fs::read_to_string(config_path)?;
        Self::parse(&contents, config_path)
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| {
            ConfigError(format!("Failed to parse {}: {}", origin.display(), e))
        })?;

        config.validate_paths()?;

        Ok(config)
    }

    /// Validate that configured paths are safe (no path traversal)
    fn validate_paths(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            if let Some(ref p) = data.path {
                Self::validate_path(p, "data.path")?;
            }
        }
        Ok(())
    }

    fn validate_path(path: &str, field: &str) -> Result<()> {
        if path.contains("..") {
            bail!(ConfigError(format!(
                "Invalid {} path '{}': paths cannot contain '..'",
                field, path
            )));
        }
        if Path::new(path).is_absolute() {
            bail!(ConfigError(format!(
                "Invalid {} path '{}': paths must be relative",
                field, path
            )));
        }
        Ok(())
    }

    /// Resolve the dataset: --data > TMDR_DATA > [data].path > embedded
    pub fn resolve_data_source(&self, cli_path: Option<&Path>) -> DataSource {
        self.resolve_data_source_with(cli_path, std::env::var(DATA_ENV_VAR).ok())
    }

    fn resolve_data_source_with(
        &self,
        cli_path: Option<&Path>,
        env_path: Option<String>,
    ) -> DataSource {
        if let Some(p) = cli_path {
            return DataSource::File(p.to_path_buf());
        }

        if let Some(p) = env_path.filter(|p| !p.trim().is_empty()) {
            return DataSource::File(PathBuf::from(p));
        }

        if let Some(p) = self.data.as_ref().and_then(|d| d.path.as_ref()) {
            return DataSource::File(PathBuf::from(p));
        }

        DataSource::Embedded
    }

    /// Fuzzy suggestion limit: --limit > [search].max_results > 3
    pub fn max_results(&self, cli_limit: Option<usize>) -> usize {
        cli_limit
            .or_else(|| self.search.as_ref().and_then(|s| s.max_results))
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// Whether colored output is enabled in config (default true)
    pub fn color_enabled(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.color)
            .unwrap_or(true)
    }
}
