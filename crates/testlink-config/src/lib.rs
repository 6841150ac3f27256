use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid records pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to scan for record files: {0}")]
    GlobError(#[from] glob::GlobError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns matching persisted test case record files
    pub records: Vec<String>,
    /// Where the verification links are written
    pub links_path: PathBuf,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.links_path = Self::expand_path(&config.links_path).unwrap_or(config.links_path);
        config.records = config
            .records
            .into_iter()
            .map(|pattern| Self::expand_pattern(&pattern).unwrap_or(pattern))
            .collect();

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Project-local config file in the working directory
    pub fn config_path() -> PathBuf {
        PathBuf::from("testlink.toml")
    }

    /// Files matched by the `records` patterns, sorted and without duplicates
    pub fn record_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files = Vec::new();
        for pattern in &self.records {
            let entries = glob::glob(pattern).map_err(|source| ConfigError::PatternError {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in entries {
                let path = entry?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        Self::expand_pattern(&path_str).map(PathBuf::from)
    }

    fn expand_pattern(pattern: &str) -> Option<String> {
        match shellexpand::full(pattern) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}
