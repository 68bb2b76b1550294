//! Revert engine: restores patched files from their backups.
//!
//! `revert_one` undoes a single applied suggestion and keeps the record
//! (marked reverted) as an audit trail. `revert_all` is a full rollback:
//! it drops reverted suggestions from the applied store entirely, so a
//! complete pass returns the persisted state to empty. The asymmetry is
//! intentional.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Suggestion, SuggestionStatus};
use crate::domain::ports::AppliedStore;

/// Result of reverting a single suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct RevertOutcome {
    pub suggestion_id: String,
    pub file_path: std::path::PathBuf,
    pub status: String,
}

/// Per-suggestion detail from a `revert_all` pass.
#[derive(Debug, Clone, Serialize)]
pub struct RevertDetail {
    pub suggestion_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregate result of a `revert_all` pass.
#[derive(Debug, Clone, Serialize)]
pub struct RevertAllOutcome {
    pub reverted_and_removed_count: usize,
    pub failed_to_revert_count: usize,
    pub details: Vec<RevertDetail>,
}

pub struct RevertService<A: AppliedStore> {
    applied: Arc<A>,
}

impl<A: AppliedStore> RevertService<A> {
    pub fn new(applied: Arc<A>) -> Self {
        Self { applied }
    }

    /// Revert one applied suggestion by moving its backup over the
    /// patched file.
    ///
    /// Only suggestions in `successfully_applied` qualify; a second revert
    /// of the same id fails with `InvalidStateTransition` and leaves the
    /// file untouched. The record stays in the applied store, marked
    /// reverted.
    pub async fn revert_one(&self, suggestion_id: &str) -> DomainResult<RevertOutcome> {
        let mut applied = self.applied.load().await?;

        let suggestion = applied
            .iter_mut()
            .flat_map(|b| b.suggestions.iter_mut())
            .find(|s| s.suggestion_id == suggestion_id)
            .ok_or_else(|| DomainError::SuggestionNotFound(suggestion_id.to_string()))?;

        if suggestion.status != SuggestionStatus::SuccessfullyApplied {
            return Err(DomainError::InvalidStateTransition {
                from: suggestion.status.as_str().to_string(),
                to: SuggestionStatus::Reverted.as_str().to_string(),
                reason: format!("suggestion {suggestion_id} is not successfully applied"),
            });
        }

        let file_path = restore_from_backup(suggestion).await?;
        suggestion.transition_to(SuggestionStatus::Reverted)?;

        let outcome = RevertOutcome {
            suggestion_id: suggestion_id.to_string(),
            file_path,
            status: SuggestionStatus::Reverted.as_str().to_string(),
        };
        self.applied.save(&applied).await?;

        tracing::info!(suggestion_id, file = %outcome.file_path.display(), "reverted suggestion");
        Ok(outcome)
    }

    /// Revert every successfully-applied suggestion, continuing past
    /// per-item failures.
    ///
    /// Reverted suggestions are dropped from their batch, and emptied
    /// batches are dropped from the store. A missing backup is reported in
    /// the details, never a fatal error.
    ///
    /// Restoration runs newest-first. Same-file backups nest: a suggestion
    /// applied second backed up the file with the first edit already in it,
    /// so the oldest backup must land last to reach the pre-everything
    /// content.
    pub async fn revert_all(&self) -> DomainResult<RevertAllOutcome> {
        let mut applied = self.applied.load().await?;

        let mut reverted = 0usize;
        let mut failed = 0usize;
        let mut details = Vec::new();

        for batch in applied.iter_mut().rev() {
            let drained: Vec<Suggestion> = batch.suggestions.drain(..).collect();
            let mut kept = Vec::with_capacity(drained.len());
            for suggestion in drained.into_iter().rev() {
                if suggestion.status != SuggestionStatus::SuccessfullyApplied {
                    kept.push(suggestion);
                    continue;
                }

                match restore_from_backup(&suggestion).await {
                    Ok(_) => {
                        reverted += 1;
                        details.push(RevertDetail {
                            suggestion_id: suggestion.suggestion_id.clone(),
                            status: "reverted_and_removed".to_string(),
                            reason: None,
                        });
                        // Dropped, not kept: revert_all shrinks the store.
                    }
                    Err(err) => {
                        tracing::warn!(
                            suggestion_id = %suggestion.suggestion_id,
                            %err,
                            "failed to revert suggestion"
                        );
                        failed += 1;
                        details.push(RevertDetail {
                            suggestion_id: suggestion.suggestion_id.clone(),
                            status: "failed".to_string(),
                            reason: Some(err.to_string()),
                        });
                        kept.push(suggestion);
                    }
                }
            }
            kept.reverse();
            batch.suggestions = kept;
        }

        applied.retain(|b| !b.suggestions.is_empty());
        self.applied.save(&applied).await?;

        Ok(RevertAllOutcome {
            reverted_and_removed_count: reverted,
            failed_to_revert_count: failed,
            details,
        })
    }
}

/// Move (not copy) the backup over the patched file; consumes the backup.
async fn restore_from_backup(suggestion: &Suggestion) -> DomainResult<std::path::PathBuf> {
    let file_path = suggestion
        .file_path
        .clone()
        .ok_or_else(|| DomainError::MissingFilePath(suggestion.suggestion_id.clone()))?;
    let backup_path = suggestion
        .backup_path
        .clone()
        .ok_or_else(|| DomainError::BackupNotRecorded(suggestion.suggestion_id.clone()))?;

    if !tokio::fs::try_exists(&backup_path).await? {
        return Err(DomainError::BackupMissing(backup_path));
    }

    tokio::fs::rename(&backup_path, &file_path).await?;
    Ok(file_path)
}
