//! Redline - reviewed documentation edit engine
//!
//! Redline takes batches of AI-proposed text edits, validates each
//! proposal against the actual document content, routes the survivors
//! through a pending/approved/rejected review workflow, applies approved
//! edits to the underlying files with backup-before-write, and can revert
//! any applied change.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, status state machine, and port traits
//! - **Service Layer** (`services`): Content matcher, section resolver,
//!   review workflow, patch executor, and revert engine
//! - **Adapters** (`adapters`): JSON-file stores and section providers
//! - **Infrastructure** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use redline::adapters::json_store::{JsonAppliedStore, JsonPendingStore};
//! use redline::adapters::sections::StaticSectionProvider;
//! use redline::services::ReviewService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pending = Arc::new(JsonPendingStore::new("data/pending_updates.json"));
//!     let applied = Arc::new(JsonAppliedStore::new("data/applied_updates.json"));
//!     let sections = Arc::new(StaticSectionProvider::default());
//!     let service = ReviewService::new(pending, applied, sections);
//!     let batches = service.list_pending(None).await?;
//!     println!("{} batch(es) pending", batches.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AppliedBatch, Batch, ChangeType, Config, LoggingConfig, RawSuggestion, ReviewConfig, Section,
    StorageConfig, Suggestion, SuggestionStatus,
};
pub use domain::ports::{AppliedStore, PendingStore, SectionProvider};
pub use domain::{DomainError, DomainResult};
pub use services::{
    match_content, resolve, ContentMatch, MatchTier, PatchExecutor, ReviewService, RevertService,
};
