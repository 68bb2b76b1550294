//! JSON-file implementation of the AppliedStore port.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AppliedBatch;
use crate::domain::ports::AppliedStore;

#[derive(Debug, Clone)]
pub struct JsonAppliedStore {
    path: PathBuf,
}

impl JsonAppliedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl AppliedStore for JsonAppliedStore {
    async fn load(&self) -> DomainResult<Vec<AppliedBatch>> {
        Ok(super::load_collection(&self.path).await)
    }

    async fn save(&self, batches: &[AppliedBatch]) -> DomainResult<()> {
        super::save_collection(&self.path, batches).await
    }
}
