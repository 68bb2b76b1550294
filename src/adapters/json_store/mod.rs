//! JSON-file implementations of the persistence ports.
//!
//! Both stores keep their whole collection in one JSON file, read and
//! rewritten per operation. Saves go through a temp-file-and-rename so a
//! crash never truncates a store. A file that is missing, unreadable, or
//! invalid JSON reads as an empty collection: the stores trade strictness
//! for availability, logging the condition instead of halting.

pub mod applied;
pub mod pending;

pub use applied::JsonAppliedStore;
pub use pending::JsonPendingStore;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::errors::DomainResult;

/// Load a JSON array from `path`, treating every failure mode as empty.
pub(crate) async fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "store unreadable, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "store corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Serialize and atomically persist a JSON array to `path`, creating the
/// parent directory on first save.
pub(crate) async fn save_collection<T: serde::Serialize>(
    path: &Path,
    items: &[T],
) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let raw = serde_json::to_string_pretty(items)?;
    crate::infrastructure::fsutil::write_atomic(path, &raw).await
}
