//! Implementation of the `redline submit` command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, RawSuggestion, Section};
use crate::services::SubmissionOutcome;

#[derive(Debug, Serialize)]
pub struct SubmitOutput {
    pub status: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<SubmissionOutcome>,
}

impl CommandOutput for SubmitOutput {
    fn to_human(&self) -> String {
        match &self.batch {
            Some(batch) => format!(
                "Saved batch {} for review: {} suggestion(s), {} dropped (no document match)",
                batch.batch_id, batch.suggestion_count, batch.dropped_count
            ),
            None => "No suggestion matched any document passage; nothing to review.".to_string(),
        }
    }
}

pub async fn execute(
    query: String,
    user: Option<String>,
    suggestions_path: PathBuf,
    sections_path: Option<PathBuf>,
    config: &Config,
    json_mode: bool,
) -> Result<()> {
    let manifest = sections_path
        .clone()
        .or_else(|| config.storage.sections_manifest.as_ref().map(Into::into));
    let Some(manifest) = manifest else {
        bail!("No sections manifest: pass --sections or set storage.sections_manifest");
    };

    let mut sections = load_json::<Vec<Section>>(&manifest)
        .await
        .context("Failed to load sections manifest")?;
    sections.truncate(config.review.max_candidate_sections);

    let raw = load_json::<Vec<RawSuggestion>>(&suggestions_path)
        .await
        .context("Failed to load suggestions file")?;

    let service = super::build_review(config, sections_path.as_deref());
    let user_id = user.unwrap_or_else(|| config.review.default_user.clone());
    let outcome = service.submit(&query, &user_id, &sections, raw).await?;

    output(
        &SubmitOutput {
            status: if outcome.is_some() {
                "saved_for_review".to_string()
            } else {
                "nothing_to_review".to_string()
            },
            query,
            batch: outcome,
        },
        json_mode,
    );
    Ok(())
}

async fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
