//! JSON-file implementation of the PendingStore port.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Batch;
use crate::domain::ports::PendingStore;

#[derive(Debug, Clone)]
pub struct JsonPendingStore {
    path: PathBuf,
}

impl JsonPendingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl PendingStore for JsonPendingStore {
    async fn load(&self) -> DomainResult<Vec<Batch>> {
        Ok(super::load_collection(&self.path).await)
    }

    async fn save(&self, batches: &[Batch]) -> DomainResult<()> {
        super::save_collection(&self.path, batches).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Batch;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPendingStore::new(dir.path().join("pending_updates.json"));
        let batches = tokio_test::block_on(store.load()).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending_updates.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonPendingStore::new(&path);
        let batches = tokio_test::block_on(store.load()).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPendingStore::new(dir.path().join("nested/pending_updates.json"));

        let batch = Batch::new("update install docs", "anonymous");
        tokio_test::block_on(store.save(std::slice::from_ref(&batch))).unwrap();

        let loaded = tokio_test::block_on(store.load()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].batch_id, batch.batch_id);
        assert_eq!(loaded[0].query, "update install docs");
    }
}
