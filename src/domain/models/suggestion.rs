//! Suggestion domain model.
//!
//! A suggestion is one proposed text substitution within one section,
//! carrying provenance (confidence, reasoning) and a lifecycle status.
//! Suggestion IDs are derived from `(batch_id, ordinal)` so they are
//! stable within a batch and never reused across batches.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Status of a suggestion in the review pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    /// Awaiting reviewer decision
    Pending,
    /// Reviewer accepted, patch not yet attempted
    Approved,
    /// Reviewer declined
    Rejected,
    /// Patch written to the target file
    SuccessfullyApplied,
    /// Patch attempt failed
    Failed,
    /// Applied patch undone from backup
    Reverted,
}

impl Default for SuggestionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::SuccessfullyApplied => "successfully_applied",
            Self::Failed => "failed",
            Self::Reverted => "reverted",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "successfully_applied" | "applied" => Some(Self::SuccessfullyApplied),
            "failed" => Some(Self::Failed),
            "reverted" => Some(Self::Reverted),
            _ => None,
        }
    }

    /// Check if this is a terminal state for the pending store.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Approved)
    }

    /// Valid transitions from this status.
    pub fn valid_transitions(&self) -> Vec<SuggestionStatus> {
        match self {
            Self::Pending => vec![Self::Approved, Self::Rejected],
            Self::Approved => vec![Self::SuccessfullyApplied, Self::Failed],
            Self::Rejected => vec![],
            Self::SuccessfullyApplied => vec![Self::Reverted],
            Self::Failed => vec![],
            Self::Reverted => vec![],
        }
    }

    pub fn can_transition_to(&self, new_status: Self) -> bool {
        self.valid_transitions().contains(&new_status)
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change a suggestion proposes. Only `Update` is defined today;
/// `Other` keeps the wire field open for future kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Update,
    #[serde(untagged)]
    Other(String),
}

impl Default for ChangeType {
    fn default() -> Self {
        Self::Update
    }
}

/// A raw, unvalidated proposal as produced by the suggestion source.
///
/// Field names mirror the generator's JSON payload. The section title is
/// whatever the generator believed the section was called; resolution to a
/// concrete section happens at submit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSuggestion {
    #[serde(default)]
    pub section_title: Option<String>,
    pub original_content: String,
    pub suggested_content: String,
    #[serde(default)]
    pub change_type: ChangeType,
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
    #[serde(default)]
    pub reasoning: String,
}

fn default_confidence() -> f64 {
    0.7
}

/// A validated suggestion persisted in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion_id: String,
    pub section_id: String,
    pub section_title: String,
    /// Normally carried directly; when absent the patch executor
    /// re-resolves the owning file through the section provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Text claimed to exist in the document. May have been corrected by
    /// the content matcher to the document's exact wording.
    pub original_content: String,
    pub suggested_content: String,
    pub change_type: ChangeType,
    /// Always finite and in [0, 1].
    pub confidence_score: f64,
    pub reasoning: String,
    pub status: SuggestionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverted_at: Option<DateTime<Utc>>,
    /// Set once the suggestion has been applied; consumed by revert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Suggestion {
    /// Move the suggestion to `new_status`, recording the transition
    /// timestamp. Rejects anything outside the legal state machine and
    /// leaves the suggestion untouched on failure.
    pub fn transition_to(&mut self, new_status: SuggestionStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: format!(
                    "suggestion {} cannot move from {} to {}",
                    self.suggestion_id, self.status, new_status
                ),
            });
        }

        let now = Utc::now();
        match new_status {
            SuggestionStatus::Approved => self.approved_at = Some(now),
            SuggestionStatus::Rejected => self.rejected_at = Some(now),
            SuggestionStatus::Reverted => self.reverted_at = Some(now),
            _ => {}
        }
        self.status = new_status;
        Ok(())
    }
}
