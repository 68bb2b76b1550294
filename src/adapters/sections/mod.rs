//! Section provider adapters.
//!
//! Document ingestion and parsing are external to the core; these adapters
//! only surface already-addressable sections. `ManifestSectionProvider`
//! reads a JSON manifest produced by whatever parsed the corpus;
//! `StaticSectionProvider` holds an in-memory snapshot for embedding and
//! tests.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Section;
use crate::domain::ports::SectionProvider;

/// Section provider backed by a JSON manifest file containing an array of
/// sections. Re-read on every call so the patch executor always sees the
/// current snapshot.
#[derive(Debug, Clone)]
pub struct ManifestSectionProvider {
    path: PathBuf,
}

impl ManifestSectionProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SectionProvider for ManifestSectionProvider {
    async fn sections(&self) -> DomainResult<Vec<Section>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                DomainError::FileNotFound(self.path.clone())
            } else {
                DomainError::Io(err)
            }
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// In-memory section provider.
#[derive(Debug, Clone, Default)]
pub struct StaticSectionProvider {
    sections: Vec<Section>,
}

impl StaticSectionProvider {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

#[async_trait]
impl SectionProvider for StaticSectionProvider {
    async fn sections(&self) -> DomainResult<Vec<Section>> {
        Ok(self.sections.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_provider_reads_sections() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("sections.json");
        std::fs::write(
            &manifest,
            r#"[{"id":"s1","title":"Install","content":"Run make install.","file_path":"/docs/install.md","section_type":"markdown_heading"}]"#,
        )
        .unwrap();

        let provider = ManifestSectionProvider::new(&manifest);
        let sections = tokio_test::block_on(provider.sections()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_id, "s1");
        assert_eq!(sections[0].title, "Install");
    }

    #[test]
    fn missing_manifest_is_a_file_not_found_error() {
        let provider = ManifestSectionProvider::new("/nonexistent/sections.json");
        let err = tokio_test::block_on(provider.sections()).unwrap_err();
        assert!(matches!(err, DomainError::FileNotFound(_)));
    }
}
