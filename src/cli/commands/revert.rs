//! Implementation of the `redline revert` and `redline revert-all` commands.

use anyhow::{Context, Result};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{RevertAllOutcome, RevertOutcome};

impl CommandOutput for RevertOutcome {
    fn to_human(&self) -> String {
        format!(
            "Reverted suggestion {}; restored {}",
            self.suggestion_id,
            self.file_path.display()
        )
    }
}

impl CommandOutput for RevertAllOutcome {
    fn to_human(&self) -> String {
        let mut lines = vec![
            "Revert process finished!".to_string(),
            format!("  Reverted and removed: {}", self.reverted_and_removed_count),
            format!("  Failed to revert: {}", self.failed_to_revert_count),
        ];
        if !self.details.is_empty() {
            lines.push("Details:".to_string());
            for detail in &self.details {
                let reason = detail
                    .reason
                    .as_ref()
                    .map(|r| format!(" (Reason: {r})"))
                    .unwrap_or_default();
                lines.push(format!(
                    "  - Suggestion {}: {}{reason}",
                    detail.suggestion_id, detail.status
                ));
            }
        }
        lines.join("\n")
    }
}

pub async fn revert_one(suggestion_id: String, config: &Config, json_mode: bool) -> Result<()> {
    let service = super::build_revert(config);
    let outcome = service
        .revert_one(&suggestion_id)
        .await
        .context("Failed to revert suggestion")?;
    output(&outcome, json_mode);
    Ok(())
}

pub async fn revert_all(config: &Config, json_mode: bool) -> Result<()> {
    let service = super::build_revert(config);
    let outcome = service
        .revert_all()
        .await
        .context("Failed to revert applied updates")?;
    output(&outcome, json_mode);
    Ok(())
}
