//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters
//! must implement:
//! - PendingStore: durable collection of batches awaiting review
//! - AppliedStore: durable collection of applied suggestion records
//! - SectionProvider: read-only view of the current document sections
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod applied_store;
pub mod pending_store;
pub mod section_provider;

pub use applied_store::AppliedStore;
pub use pending_store::PendingStore;
pub use section_provider::SectionProvider;
