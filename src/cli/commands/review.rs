//! Implementation of the review commands: pending, approve, reject,
//! applied, stats.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{AppliedBatch, Batch, Config};
use crate::services::{ApprovalOutcome, RejectionOutcome, UpdateStatistics};

#[derive(Debug, Serialize)]
pub struct PendingOutput {
    pub count: usize,
    pub pending_updates: Vec<Batch>,
}

impl CommandOutput for PendingOutput {
    fn to_human(&self) -> String {
        if self.pending_updates.is_empty() {
            return "No pending updates.".to_string();
        }
        let table = TableFormatter::new().format_pending(&self.pending_updates);
        format!(
            "{table}\n{} batch(es), {} pending suggestion(s)",
            self.pending_updates.len(),
            self.pending_updates
                .iter()
                .map(|b| b.suggestions.len())
                .sum::<usize>()
        )
    }
}

impl CommandOutput for ApprovalOutcome {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Batch {}: {} applied, {} failed",
            self.batch_id, self.approved_count, self.failed_count
        )];
        for change in &self.changes {
            lines.push(format!(
                "  - {} [{}]: {}",
                change.suggestion_id, change.status, change.detail
            ));
        }
        lines.join("\n")
    }
}

impl CommandOutput for RejectionOutcome {
    fn to_human(&self) -> String {
        format!(
            "Batch {}: rejected {} suggestion(s)",
            self.batch_id, self.rejected_count
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AppliedOutput {
    pub count: usize,
    pub applied_updates: Vec<AppliedBatch>,
}

impl CommandOutput for AppliedOutput {
    fn to_human(&self) -> String {
        if self.applied_updates.is_empty() {
            return "No applied updates.".to_string();
        }
        let table = TableFormatter::new().format_applied(&self.applied_updates);
        format!("{table}\n{} applied batch(es)", self.applied_updates.len())
    }
}

impl CommandOutput for UpdateStatistics {
    fn to_human(&self) -> String {
        TableFormatter::new().format_statistics(self)
    }
}

pub async fn pending(batch: Option<String>, config: &Config, json_mode: bool) -> Result<()> {
    let service = super::build_review(config, None);
    let batches = service
        .list_pending(batch.as_deref())
        .await
        .context("Failed to list pending updates")?;
    output(
        &PendingOutput {
            count: batches.len(),
            pending_updates: batches,
        },
        json_mode,
    );
    Ok(())
}

pub async fn approve(
    batch_id: String,
    ids: Vec<String>,
    config: &Config,
    json_mode: bool,
) -> Result<()> {
    let service = super::build_review(config, None);
    let outcome = service
        .approve(&batch_id, &ids)
        .await
        .context("Failed to approve suggestions")?;
    output(&outcome, json_mode);
    Ok(())
}

pub async fn reject(
    batch_id: String,
    ids: Vec<String>,
    config: &Config,
    json_mode: bool,
) -> Result<()> {
    let service = super::build_review(config, None);
    let outcome = service
        .reject(&batch_id, &ids)
        .await
        .context("Failed to reject suggestions")?;
    output(&outcome, json_mode);
    Ok(())
}

pub async fn applied(config: &Config, json_mode: bool) -> Result<()> {
    let service = super::build_review(config, None);
    let batches = service
        .list_applied()
        .await
        .context("Failed to list applied updates")?;
    output(
        &AppliedOutput {
            count: batches.len(),
            applied_updates: batches,
        },
        json_mode,
    );
    Ok(())
}

pub async fn stats(config: &Config, json_mode: bool) -> Result<()> {
    let service = super::build_review(config, None);
    let stats = service
        .statistics()
        .await
        .context("Failed to compute statistics")?;
    output(&stats, json_mode);
    Ok(())
}
