//! Portfolio Common Library
//!
//! Shared code for the portfolio API:
//! - Record schemas and validation
//! - Document store abstraction and repository
//! - Error types and handling
//! - Configuration management
//! - Metrics

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod schema;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DocumentStore, Repository, SharedStore};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
