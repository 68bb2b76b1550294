//! CLI command implementations.

pub mod init;
pub mod review;
pub mod revert;
pub mod submit;

use std::path::Path;
use std::sync::Arc;

use crate::adapters::json_store::{JsonAppliedStore, JsonPendingStore};
use crate::adapters::sections::ManifestSectionProvider;
use crate::domain::models::Config;
use crate::services::{ReviewService, RevertService};

pub(crate) type CliReviewService =
    ReviewService<JsonPendingStore, JsonAppliedStore, ManifestSectionProvider>;
pub(crate) type CliRevertService = RevertService<JsonAppliedStore>;

/// Wire the services to the configured JSON stores.
///
/// The section provider points at the configured manifest when one exists;
/// otherwise at a placeholder path that only errors if something actually
/// needs to re-resolve a section.
pub(crate) fn build_review(config: &Config, sections_override: Option<&Path>) -> CliReviewService {
    let pending = Arc::new(JsonPendingStore::new(config.storage.pending_path()));
    let applied = Arc::new(JsonAppliedStore::new(config.storage.applied_path()));
    let manifest = sections_override
        .map(|p| p.to_path_buf())
        .or_else(|| config.storage.sections_manifest.as_ref().map(Into::into))
        .unwrap_or_else(|| Path::new(&config.storage.data_dir).join("sections.json"));
    let sections = Arc::new(ManifestSectionProvider::new(manifest));
    ReviewService::new(pending, applied, sections)
}

pub(crate) fn build_revert(config: &Config) -> CliRevertService {
    let applied = Arc::new(JsonAppliedStore::new(config.storage.applied_path()));
    RevertService::new(applied)
}
