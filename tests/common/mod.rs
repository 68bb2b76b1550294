//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use redline::adapters::json_store::{JsonAppliedStore, JsonPendingStore};
use redline::adapters::sections::StaticSectionProvider;
use redline::domain::models::{ChangeType, RawSuggestion, Section};
use redline::services::{ReviewService, RevertService};

pub type TestReviewService =
    ReviewService<JsonPendingStore, JsonAppliedStore, StaticSectionProvider>;
pub type TestRevertService = RevertService<JsonAppliedStore>;

pub struct TestHarness {
    pub dir: TempDir,
    pub review: TestReviewService,
    pub revert: TestRevertService,
    pub sections: Vec<Section>,
}

/// One document file with two sections, plus wired-up services in a
/// temporary directory.
pub fn setup() -> TestHarness {
    let dir = tempfile::tempdir().expect("create temp dir");

    let doc_path = dir.path().join("install.md");
    std::fs::write(&doc_path, doc_content()).expect("write doc");

    let sections = vec![
        Section::new(
            "sec-install",
            "Installation",
            "Run `make install` to build the project.\nThe default prefix is /usr/local.",
            &doc_path,
        ),
        Section::new(
            "sec-config",
            "Configuration",
            "Set REDLINE_HOME before launching.",
            &doc_path,
        ),
    ];

    let pending = Arc::new(JsonPendingStore::new(dir.path().join("pending_updates.json")));
    let applied = Arc::new(JsonAppliedStore::new(dir.path().join("applied_updates.json")));
    let provider = Arc::new(StaticSectionProvider::new(sections.clone()));

    let review = ReviewService::new(pending, Arc::clone(&applied), provider);
    let revert = RevertService::new(applied);

    TestHarness {
        dir,
        review,
        revert,
        sections,
    }
}

pub fn doc_content() -> &'static str {
    "# Installation\n\nRun `make install` to build the project.\nThe default prefix is /usr/local.\n\n# Configuration\n\nSet REDLINE_HOME before launching.\n"
}

pub fn doc_path(harness: &TestHarness) -> PathBuf {
    harness.dir.path().join("install.md")
}

pub fn raw_suggestion(original: &str, suggested: &str, confidence: f64) -> RawSuggestion {
    RawSuggestion {
        section_title: Some("Installation".to_string()),
        original_content: original.to_string(),
        suggested_content: suggested.to_string(),
        change_type: ChangeType::Update,
        confidence_score: confidence,
        reasoning: "test suggestion".to_string(),
    }
}

/// Backup files created next to the document.
pub fn backup_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().contains(".backup."))
        .collect()
}
