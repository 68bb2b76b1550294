//! Infrastructure adapters for external systems.

pub mod json_store;
pub mod sections;
