//! Implementation of the `redline init` command.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_path: String,
    pub data_dir: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        if self.success {
            format!(
                "{}\n  Config: {}\n  Data directory: {}",
                self.message, self.config_path, self.data_dir
            )
        } else {
            self.message.clone()
        }
    }
}

pub async fn execute(force: bool, json_mode: bool) -> Result<()> {
    let redline_dir = std::path::Path::new(".redline");
    let config_path = redline_dir.join("config.yaml");

    if config_path.exists() && !force {
        output(
            &InitOutput {
                success: false,
                message: "Project already initialized. Use --force to reinitialize.".to_string(),
                config_path: config_path.display().to_string(),
                data_dir: String::new(),
            },
            json_mode,
        );
        return Ok(());
    }

    let config = Config::default();

    fs::create_dir_all(redline_dir)
        .await
        .context("Failed to create .redline directory")?;
    fs::create_dir_all(&config.storage.data_dir)
        .await
        .context("Failed to create data directory")?;

    let yaml = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
    fs::write(&config_path, yaml)
        .await
        .context("Failed to write config file")?;

    // Seed both stores as empty collections.
    for path in [config.storage.pending_path(), config.storage.applied_path()] {
        if !path.exists() {
            fs::write(&path, "[]").await.context("Failed to seed store file")?;
        }
    }

    output(
        &InitOutput {
            success: true,
            message: "Initialized Redline project.".to_string(),
            config_path: config_path.display().to_string(),
            data_dir: config.storage.data_dir.clone(),
        },
        json_mode,
    );
    Ok(())
}
