//! In-process backend for local development and tests

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::Result;

/// Document store holding collections in memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a collection's documents, identifiers included
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String> {
        let id = match document.get("_id") {
            Some(existing) => existing.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.documents(collection).await)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
