//! Review service implementing the batch and suggestion workflow.
//!
//! Owns every suggestion status transition. Suggestions enter as raw
//! generator proposals, get resolved and validated against ground-truth
//! document text, and persist as a pending batch. Reviewers then approve
//! or reject suggestion ids; approved ones flow through the patch executor
//! and, when successful, move to the applied store. The pending and
//! applied stores partition a suggestion's life: once a suggestion reaches
//! a terminal outcome it leaves the pending batch, and a pending batch
//! with no suggestions left is deleted outright.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AppliedBatch, Batch, RawSuggestion, Section, Suggestion, SuggestionStatus,
};
use crate::domain::ports::{AppliedStore, PendingStore, SectionProvider};

use super::matcher::match_content;
use super::patcher::PatchExecutor;
use super::resolver::resolve;

/// Result of an approve operation.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    pub batch_id: String,
    /// Suggestions that were approved and successfully applied.
    pub approved_count: usize,
    /// Suggestions that were approved but failed to apply.
    pub failed_count: usize,
    pub changes: Vec<AppliedChange>,
}

/// Per-suggestion detail of an approve operation.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedChange {
    pub suggestion_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    pub status: String,
    pub detail: String,
}

/// Result of a reject operation.
#[derive(Debug, Clone, Serialize)]
pub struct RejectionOutcome {
    pub batch_id: String,
    pub rejected_count: usize,
}

/// Aggregate counts over the pending and applied stores.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatistics {
    pub pending_batches: usize,
    pub pending_suggestions: usize,
    pub applied_batches: usize,
    pub applied_suggestions: usize,
    pub total_suggestions: usize,
}

/// Outcome of submitting raw suggestions for review.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub batch_id: String,
    pub suggestion_count: usize,
    /// Proposals dropped because they matched no real document passage.
    pub dropped_count: usize,
}

pub struct ReviewService<P: PendingStore, A: AppliedStore, S: SectionProvider> {
    pending: Arc<P>,
    applied: Arc<A>,
    executor: PatchExecutor<S>,
}

impl<P: PendingStore, A: AppliedStore, S: SectionProvider> ReviewService<P, A, S> {
    pub fn new(pending: Arc<P>, applied: Arc<A>, sections: Arc<S>) -> Self {
        Self {
            pending,
            applied,
            executor: PatchExecutor::new(sections),
        }
    }

    /// Validate raw generator proposals against the candidate sections and
    /// persist the survivors as a new pending batch.
    ///
    /// Proposals whose original content matches no real passage in their
    /// resolved section are dropped silently: an invented citation is not
    /// an error, it is simply nothing to review. Returns `None` when every
    /// proposal was dropped (or no candidates were supplied), in which
    /// case nothing is persisted.
    pub async fn submit(
        &self,
        query: &str,
        user_id: &str,
        candidates: &[Section],
        raw_suggestions: Vec<RawSuggestion>,
    ) -> DomainResult<Option<SubmissionOutcome>> {
        if candidates.is_empty() || raw_suggestions.is_empty() {
            return Ok(None);
        }

        let total = raw_suggestions.len();
        let mut batch = Batch::new(query, user_id);
        let mut validated = Vec::new();

        for raw in raw_suggestions {
            let title = raw.section_title.as_deref().unwrap_or("");

            // Lenient default: an unresolvable title still lands on the
            // top-ranked candidate rather than discarding the proposal.
            let section = resolve(title, &raw.original_content, candidates)
                .unwrap_or(&candidates[0]);

            let Some(matched) = match_content(&raw.original_content, &section.content) else {
                tracing::debug!(
                    section_id = %section.section_id,
                    "dropping suggestion with no document match"
                );
                continue;
            };

            let claimed = if raw.confidence_score.is_finite() {
                raw.confidence_score.clamp(0.0, 1.0)
            } else {
                0.0
            };

            validated.push(Suggestion {
                suggestion_id: format!("{}_{}", batch.batch_id, validated.len()),
                section_id: section.section_id.clone(),
                section_title: section.title.clone(),
                file_path: Some(section.file_path.clone()),
                original_content: matched.authoritative_text,
                suggested_content: raw.suggested_content,
                change_type: raw.change_type,
                confidence_score: claimed.min(matched.tier.confidence_cap()),
                reasoning: raw.reasoning,
                status: SuggestionStatus::Pending,
                approved_at: None,
                rejected_at: None,
                reverted_at: None,
                backup_path: None,
                error: None,
            });
        }

        if validated.is_empty() {
            return Ok(None);
        }

        batch.suggestions = validated;
        let outcome = SubmissionOutcome {
            batch_id: batch.batch_id.clone(),
            suggestion_count: batch.suggestions.len(),
            dropped_count: total - batch.suggestions.len(),
        };

        let mut batches = self.pending.load().await?;
        batches.push(batch);
        self.pending.save(&batches).await?;

        tracing::info!(
            batch_id = %outcome.batch_id,
            suggestions = outcome.suggestion_count,
            dropped = outcome.dropped_count,
            "created pending batch"
        );
        Ok(Some(outcome))
    }

    /// Batches that still hold pending suggestions, filtered live: every
    /// returned batch contains only its pending suggestions, and batches
    /// with none are omitted entirely.
    pub async fn list_pending(&self, batch_id: Option<&str>) -> DomainResult<Vec<Batch>> {
        let batches = self.pending.load().await?;
        Ok(batches
            .into_iter()
            .filter(|b| batch_id.is_none_or(|id| b.batch_id == id))
            .map(|mut b| {
                b.suggestions.retain(|s| s.status == SuggestionStatus::Pending);
                b
            })
            .filter(|b| !b.suggestions.is_empty())
            .collect())
    }

    /// Approve suggestion ids in a batch and apply them to their files.
    ///
    /// Transition legality is checked up front: if any requested id exists
    /// in the batch but is not pending, the whole operation fails with
    /// `InvalidStateTransition` and no state changes. Patch failures, by
    /// contrast, are per-suggestion: one failure never blocks siblings.
    pub async fn approve(&self, batch_id: &str, ids: &[String]) -> DomainResult<ApprovalOutcome> {
        let mut batches = self.pending.load().await?;
        let batch_idx = batches
            .iter()
            .position(|b| b.batch_id == batch_id)
            .ok_or_else(|| DomainError::BatchNotFound(batch_id.to_string()))?;

        for suggestion in &batches[batch_idx].suggestions {
            if ids.contains(&suggestion.suggestion_id)
                && suggestion.status != SuggestionStatus::Pending
            {
                return Err(DomainError::InvalidStateTransition {
                    from: suggestion.status.as_str().to_string(),
                    to: SuggestionStatus::Approved.as_str().to_string(),
                    reason: format!("suggestion {} is not pending", suggestion.suggestion_id),
                });
            }
        }

        let mut changes = Vec::new();
        let mut succeeded = Vec::new();
        let mut failed_count = 0usize;

        for suggestion in &mut batches[batch_idx].suggestions {
            if !ids.contains(&suggestion.suggestion_id) {
                continue;
            }
            suggestion.transition_to(SuggestionStatus::Approved)?;

            match self.executor.apply(suggestion).await {
                Ok(outcome) => {
                    suggestion.transition_to(SuggestionStatus::SuccessfullyApplied)?;
                    suggestion.backup_path = Some(outcome.backup_path.clone());
                    succeeded.push(suggestion.clone());
                    changes.push(AppliedChange {
                        suggestion_id: outcome.suggestion_id,
                        file_path: Some(outcome.file_path),
                        backup_path: Some(outcome.backup_path),
                        status: outcome.status.as_str().to_string(),
                        detail: outcome.changes_made,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        suggestion_id = %suggestion.suggestion_id,
                        %err,
                        "failed to apply suggestion"
                    );
                    suggestion.transition_to(SuggestionStatus::Failed)?;
                    suggestion.error = Some(err.to_string());
                    failed_count += 1;
                    changes.push(AppliedChange {
                        suggestion_id: suggestion.suggestion_id.clone(),
                        file_path: suggestion.file_path.clone(),
                        backup_path: None,
                        status: SuggestionStatus::Failed.as_str().to_string(),
                        detail: err.to_string(),
                    });
                }
            }
        }

        // Terminal outcomes leave the pending batch; an emptied batch
        // leaves the store.
        batches[batch_idx]
            .suggestions
            .retain(|s| !s.status.is_terminal());
        if batches[batch_idx].suggestions.is_empty() {
            batches.remove(batch_idx);
        }
        self.pending.save(&batches).await?;

        if !succeeded.is_empty() {
            self.append_applied(batch_id, succeeded.clone()).await?;
        }

        Ok(ApprovalOutcome {
            batch_id: batch_id.to_string(),
            approved_count: succeeded.len(),
            failed_count,
            changes,
        })
    }

    /// Reject suggestion ids in a batch.
    ///
    /// Same up-front legality check as `approve`: a requested id that is
    /// not pending fails the whole operation untouched.
    pub async fn reject(&self, batch_id: &str, ids: &[String]) -> DomainResult<RejectionOutcome> {
        let mut batches = self.pending.load().await?;
        let batch_idx = batches
            .iter()
            .position(|b| b.batch_id == batch_id)
            .ok_or_else(|| DomainError::BatchNotFound(batch_id.to_string()))?;

        for suggestion in &batches[batch_idx].suggestions {
            if ids.contains(&suggestion.suggestion_id)
                && suggestion.status != SuggestionStatus::Pending
            {
                return Err(DomainError::InvalidStateTransition {
                    from: suggestion.status.as_str().to_string(),
                    to: SuggestionStatus::Rejected.as_str().to_string(),
                    reason: format!("suggestion {} is not pending", suggestion.suggestion_id),
                });
            }
        }

        let mut rejected_count = 0usize;
        for suggestion in &mut batches[batch_idx].suggestions {
            if ids.contains(&suggestion.suggestion_id) {
                suggestion.transition_to(SuggestionStatus::Rejected)?;
                rejected_count += 1;
            }
        }

        batches[batch_idx]
            .suggestions
            .retain(|s| s.status != SuggestionStatus::Rejected);
        if batches[batch_idx].suggestions.is_empty() {
            batches.remove(batch_idx);
        }
        self.pending.save(&batches).await?;

        Ok(RejectionOutcome {
            batch_id: batch_id.to_string(),
            rejected_count,
        })
    }

    /// All applied records.
    pub async fn list_applied(&self) -> DomainResult<Vec<AppliedBatch>> {
        self.applied.load().await
    }

    /// Pure aggregate over the two stores; mutates nothing.
    pub async fn statistics(&self) -> DomainResult<UpdateStatistics> {
        let pending = self.list_pending(None).await?;
        let applied = self.applied.load().await?;

        let pending_suggestions: usize = pending.iter().map(|b| b.suggestions.len()).sum();
        let applied_suggestions: usize = applied.iter().map(|b| b.suggestions.len()).sum();

        Ok(UpdateStatistics {
            pending_batches: pending.len(),
            pending_suggestions,
            applied_batches: applied.len(),
            applied_suggestions,
            total_suggestions: pending_suggestions + applied_suggestions,
        })
    }

    /// Append successfully-applied suggestions to the applied store,
    /// merging into an existing record with the same batch id.
    async fn append_applied(
        &self,
        batch_id: &str,
        suggestions: Vec<Suggestion>,
    ) -> DomainResult<()> {
        let mut applied = self.applied.load().await?;
        match applied.iter_mut().find(|b| b.batch_id == batch_id) {
            Some(record) => record.suggestions.extend(suggestions),
            None => applied.push(AppliedBatch {
                batch_id: batch_id.to_string(),
                applied_at: Utc::now(),
                suggestions,
            }),
        }
        self.applied.save(&applied).await
    }
}
