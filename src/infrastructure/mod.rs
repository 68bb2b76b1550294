//! Infrastructure layer module
//!
//! This module contains infrastructure concerns shared across adapters:
//! - Configuration management (figment-based loader)
//! - Logging infrastructure (tracing subscriber setup)
//! - Atomic filesystem helpers
//!
//! Infrastructure implementations satisfy the port traits defined in the
//! domain layer.

pub mod config;
pub mod fsutil;
pub mod logging;
