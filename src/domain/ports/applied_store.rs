use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AppliedBatch;

/// Repository port for the applied-suggestion records.
///
/// Holds only suggestions that reached `successfully_applied` or later.
/// Same read-modify-write and atomic-save contract as [`PendingStore`].
///
/// [`PendingStore`]: super::PendingStore
#[async_trait]
pub trait AppliedStore: Send + Sync {
    /// Load the full applied collection. An unreadable or corrupt store
    /// reads as an empty collection rather than an error.
    async fn load(&self) -> DomainResult<Vec<AppliedBatch>>;

    /// Atomically replace the full applied collection.
    async fn save(&self, batches: &[AppliedBatch]) -> DomainResult<()>;
}
