use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Section;

/// Read-only view of the current document sections.
///
/// Ingestion and parsing live behind this port; the core only consumes the
/// already-addressable sections. Used at suggestion-submission time and
/// again by the patch executor when a suggestion does not carry its target
/// file path.
#[async_trait]
pub trait SectionProvider: Send + Sync {
    /// Snapshot of all sections currently known.
    async fn sections(&self) -> DomainResult<Vec<Section>>;
}
