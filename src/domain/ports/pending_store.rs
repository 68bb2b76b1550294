use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Batch;

/// Repository port for the pending-batch collection.
///
/// The persisted representation is read-modify-write as a whole: every
/// mutation loads the full collection, edits an in-memory copy, and saves
/// the full collection back. Implementations must make `save` atomic
/// (write to a temporary path, then rename) so a crash never leaves a
/// partially written store behind.
#[async_trait]
pub trait PendingStore: Send + Sync {
    /// Load the full pending collection. An unreadable or corrupt store
    /// reads as an empty collection rather than an error.
    async fn load(&self) -> DomainResult<Vec<Batch>>;

    /// Atomically replace the full pending collection.
    async fn save(&self, batches: &[Batch]) -> DomainResult<()>;
}
