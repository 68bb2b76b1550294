//! Document section domain model.
//!
//! Sections are the addressable units of document text that suggestions
//! target. They are immutable snapshots taken at parse time: the patch
//! executor mutates the underlying file, never the snapshot, so callers
//! must re-resolve sections when they need post-patch content.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An addressable unit of document text with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Opaque unique identifier assigned at parse time.
    #[serde(rename = "id")]
    pub section_id: String,
    /// Human-readable section title.
    pub title: String,
    /// Full text of the section.
    pub content: String,
    /// Physical file owning the content.
    pub file_path: PathBuf,
    /// Kind of section (e.g. "json_page", "markdown_heading").
    pub section_type: String,
}

impl Section {
    pub fn new(
        section_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            title: title.into(),
            content: content.into(),
            file_path: file_path.into(),
            section_type: "markdown_heading".to_string(),
        }
    }
}
