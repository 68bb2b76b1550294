use serde::{Deserialize, Serialize};

/// Main configuration structure for Redline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Persistent store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Review workflow configuration
    #[serde(default)]
    pub review: ReviewConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistent store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Directory holding the pending and applied store files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Pending store file name, relative to `data_dir`
    #[serde(default = "default_pending_file")]
    pub pending_file: String,

    /// Applied store file name, relative to `data_dir`
    #[serde(default = "default_applied_file")]
    pub applied_file: String,

    /// JSON manifest of document sections, used by the CLI when no
    /// explicit `--sections` file is given
    #[serde(default)]
    pub sections_manifest: Option<String>,
}

fn default_data_dir() -> String {
    ".redline/data".to_string()
}

fn default_pending_file() -> String {
    "pending_updates.json".to_string()
}

fn default_applied_file() -> String {
    "applied_updates.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pending_file: default_pending_file(),
            applied_file: default_applied_file(),
            sections_manifest: None,
        }
    }
}

impl StorageConfig {
    pub fn pending_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.pending_file)
    }

    pub fn applied_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.applied_file)
    }
}

/// Review workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewConfig {
    /// User recorded on batches submitted without an explicit user
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Upper bound on candidate sections considered per submission
    #[serde(default = "default_max_candidate_sections")]
    pub max_candidate_sections: usize,
}

fn default_user() -> String {
    "anonymous".to_string()
}

const fn default_max_candidate_sections() -> usize {
    50
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            max_candidate_sections: default_max_candidate_sections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json, pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
