//! Document store access for the portfolio API
//!
//! Provides:
//! - The `DocumentStore` abstraction over named collections
//! - MongoDB and in-memory backends
//! - A generic `Repository` parameterized by record type
//! - Degraded-mode connection handling

mod memory;
mod mongo;
mod repository;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;
use tracing::{info, warn};

/// Connection string selecting the in-process store
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Database name used when neither config nor connection string names one
pub const DEFAULT_DATABASE_NAME: &str = "portfolio";

/// Shared, read-only handle to the document store
pub type SharedStore = Arc<dyn DocumentStore>;

/// Insert-one / find-all access to named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return the store-assigned identifier
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String>;

    /// Every document in the collection, in store-native order
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Names of the collections in the database
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Open the configured store.
///
/// Returns `None` when no connection string is configured or the store
/// cannot be reached; callers run disconnected instead of failing.
pub async fn connect(config: &DatabaseConfig) -> Option<SharedStore> {
    let Some(url) = config.url.as_deref() else {
        warn!("No database URL configured, running disconnected");
        return None;
    };

    if url.starts_with(MEMORY_URL_SCHEME) {
        info!("Using in-memory document store");
        let store: SharedStore = Arc::new(MemoryStore::new());
        return Some(store);
    }

    match MongoStore::connect(url, config).await {
        Ok(store) => {
            let store: SharedStore = Arc::new(store);
            Some(store)
        }
        Err(e) => {
            warn!(error = %e, "Database connection failed, running disconnected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>) -> DatabaseConfig {
        DatabaseConfig {
            url: url.map(str::to_string),
            name: None,
            connect_timeout_ms: 200,
        }
    }

    #[tokio::test]
    async fn test_connect_without_url() {
        assert!(connect(&config(None)).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let store = connect(&config(Some("memory://"))).await.unwrap();
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn test_connect_malformed_url_degrades() {
        assert!(connect(&config(Some("not-a-connection-string"))).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_unreachable_degrades() {
        assert!(connect(&config(Some("mongodb://127.0.0.1:1"))).await.is_none());
    }
}
