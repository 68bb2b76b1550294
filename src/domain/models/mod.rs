pub mod batch;
pub mod config;
pub mod section;
pub mod suggestion;

pub use batch::{generate_batch_id, AppliedBatch, Batch};
pub use config::{Config, LoggingConfig, ReviewConfig, StorageConfig};
pub use section::Section;
pub use suggestion::{ChangeType, RawSuggestion, Suggestion, SuggestionStatus};
