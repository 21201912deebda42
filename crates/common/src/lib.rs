//! Reframe Common Utilities
//!
//! Shared infrastructure for all Reframe crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Run configuration

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
