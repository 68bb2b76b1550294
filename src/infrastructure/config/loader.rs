use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Storage data directory cannot be empty")]
    EmptyDataDir,

    #[error("Storage file name cannot be empty: {0}")]
    EmptyStoreFile(&'static str),

    #[error("Invalid max_candidate_sections: {0}. Must be at least 1")]
    InvalidMaxCandidateSections(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .redline/config.yaml (project config, created by init)
    /// 3. .redline/local.yaml (project local overrides, optional)
    /// 4. Environment variables (REDLINE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".redline/config.yaml"))
            .merge(Yaml::file(".redline/local.yaml"))
            .merge(Env::prefixed("REDLINE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("REDLINE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.storage.data_dir.is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        if config.storage.pending_file.is_empty() {
            return Err(ConfigError::EmptyStoreFile("pending_file"));
        }
        if config.storage.applied_file.is_empty() {
            return Err(ConfigError::EmptyStoreFile("applied_file"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.review.max_candidate_sections == 0 {
            return Err(ConfigError::InvalidMaxCandidateSections(
                config.review.max_candidate_sections,
            ));
        }

        Ok(())
    }
}
