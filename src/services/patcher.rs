//! Patch executor: applies one suggestion to one file.
//!
//! Every write is preceded by a durable backup of the unmodified file;
//! the backup is the sole safety net that makes reversal possible, so it
//! is flushed to disk before the mutating write proceeds. The mutating
//! write itself goes through a temp-file rename, never an in-place
//! truncate-and-write.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Suggestion;
use crate::domain::ports::SectionProvider;
use crate::infrastructure::fsutil;

/// How the suggestion landed in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    /// `original_content` was found verbatim and substituted in place.
    Applied,
    /// `original_content` was not found verbatim; the suggested content
    /// was appended as a trailing annotated block instead.
    AppliedAsAddition,
}

impl PatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::AppliedAsAddition => "applied_as_addition",
        }
    }
}

/// Result of one successful patch.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOutcome {
    pub suggestion_id: String,
    pub file_path: PathBuf,
    pub backup_path: PathBuf,
    pub status: PatchStatus,
    pub changes_made: String,
}

/// Applies suggestions to their target files.
pub struct PatchExecutor<S: SectionProvider> {
    sections: Arc<S>,
}

impl<S: SectionProvider> PatchExecutor<S> {
    pub fn new(sections: Arc<S>) -> Self {
        Self { sections }
    }

    /// Apply one suggestion: resolve the target file, back it up, then
    /// substitute in place or append.
    pub async fn apply(&self, suggestion: &Suggestion) -> DomainResult<PatchOutcome> {
        let file_path = self.resolve_file_path(suggestion).await?;

        if !tokio::fs::try_exists(&file_path).await? {
            return Err(DomainError::FileNotFound(file_path));
        }
        let content = tokio::fs::read_to_string(&file_path).await?;

        // Backup first, durably. Without this the patch is irreversible.
        let backup_path = backup_path_for(&file_path);
        fsutil::write_durable(&backup_path, &content).await?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        let (updated, status, changes_made) = if content.contains(&suggestion.original_content) {
            (
                content.replacen(&suggestion.original_content, &suggestion.suggested_content, 1),
                PatchStatus::Applied,
                format!("Replaced content in {file_name}"),
            )
        } else {
            // Permissive fallback: the validated original content can still
            // miss the file verbatim (the normalized matcher tier accepts
            // cosmetic drift without correcting it). Append rather than fail.
            (
                format!("{content}\n\n<!-- UPDATED: {} -->\n", suggestion.suggested_content),
                PatchStatus::AppliedAsAddition,
                format!("Appended suggested content to {file_name}"),
            )
        };

        if let Err(err) = fsutil::write_atomic(&file_path, &updated).await {
            // The file was never changed, so the backup protects nothing;
            // left behind it would be unconsumable forever.
            let _ = tokio::fs::remove_file(&backup_path).await;
            return Err(err);
        }

        tracing::info!(
            suggestion_id = %suggestion.suggestion_id,
            file = %file_path.display(),
            status = status.as_str(),
            "applied suggestion"
        );

        Ok(PatchOutcome {
            suggestion_id: suggestion.suggestion_id.clone(),
            file_path,
            backup_path,
            status,
            changes_made,
        })
    }

    /// Target file: carried on the suggestion when present, otherwise
    /// re-resolved by section id through the provider.
    async fn resolve_file_path(&self, suggestion: &Suggestion) -> DomainResult<PathBuf> {
        if let Some(path) = &suggestion.file_path {
            return Ok(path.clone());
        }

        let sections = self.sections.sections().await?;
        sections
            .iter()
            .find(|s| s.section_id == suggestion.section_id)
            .map(|s| s.file_path.clone())
            .ok_or_else(|| DomainError::SectionNotFound(suggestion.section_id.clone()))
    }
}

/// Backup sibling of the original file. The random component keeps two
/// rapid patches of the same file from sharing a suffix; a collision here
/// would truncate the earlier backup, destroying the only copy of the
/// pre-change content.
fn backup_path_for(file_path: &std::path::Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
    let nonce = Uuid::new_v4().simple().to_string();
    PathBuf::from(format!(
        "{}.backup.{stamp}_{}",
        file_path.display(),
        &nonce[..8]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_is_a_sibling_with_suffix() {
        let backup = backup_path_for(std::path::Path::new("/docs/install.md"));
        let name = backup.to_string_lossy().into_owned();
        assert!(name.starts_with("/docs/install.md.backup."));
        assert_eq!(backup.parent(), Some(std::path::Path::new("/docs")));
    }

    #[test]
    fn backup_paths_never_collide_for_rapid_patches() {
        let target = std::path::Path::new("/docs/install.md");
        let a = backup_path_for(target);
        let b = backup_path_for(target);
        assert_ne!(a, b);
    }
}
