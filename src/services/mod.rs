pub mod matcher;
pub mod patcher;
pub mod resolver;
pub mod review;
pub mod revert;

pub use matcher::{match_content, normalize, ContentMatch, MatchTier};
pub use patcher::{PatchExecutor, PatchOutcome, PatchStatus};
pub use resolver::resolve;
pub use review::{
    ApprovalOutcome, AppliedChange, RejectionOutcome, ReviewService, SubmissionOutcome,
    UpdateStatistics,
};
pub use revert::{RevertAllOutcome, RevertDetail, RevertOutcome, RevertService};
