//! Batch domain models.
//!
//! A batch groups the suggestions created from one submitted query. Pending
//! batches and applied batches live in separate stores that partition a
//! suggestion's life over time: a suggestion is never live in both at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::suggestion::{Suggestion, SuggestionStatus};

/// A batch of suggestions awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String,
    /// The change request that produced this batch.
    pub query: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub suggestions: Vec<Suggestion>,
}

impl Batch {
    pub fn new(query: impl Into<String>, user_id: impl Into<String>) -> Self {
        let created_at = Utc::now();
        Self {
            batch_id: generate_batch_id(created_at),
            query: query.into(),
            user_id: user_id.into(),
            created_at,
            status: "pending".to_string(),
            suggestions: Vec::new(),
        }
    }

    /// Suggestions currently awaiting review.
    pub fn pending_suggestions(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions
            .iter()
            .filter(|s| s.status == SuggestionStatus::Pending)
    }

    pub fn has_pending(&self) -> bool {
        self.pending_suggestions().next().is_some()
    }
}

/// A batch-shaped record of suggestions that have been physically written
/// to a document file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedBatch {
    pub batch_id: String,
    pub applied_at: DateTime<Utc>,
    pub suggestions: Vec<Suggestion>,
}

/// Time-derived batch identifier with a random suffix.
///
/// The suffix guards against collisions under rapid sequential creation,
/// which second-granularity timestamps alone cannot.
pub fn generate_batch_id(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("batch_{}_{}", at.format("%Y%m%d_%H%M%S"), &suffix[..8])
}
