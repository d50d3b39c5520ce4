//! MongoDB backend

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Database};
use std::time::Duration;
use tracing::info;

use super::{DocumentStore, DEFAULT_DATABASE_NAME};
use crate::config::DatabaseConfig;
use crate::errors::Result;

/// Document store backed by a MongoDB database
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect and verify the server answers a ping
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(url).await?;

        // Bound server selection so an unreachable store fails fast
        let timeout = Duration::from_millis(config.connect_timeout_ms);
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)?;

        let database = match config.name.as_deref() {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
        };

        database.run_command(doc! { "ping": 1 }).await?;

        info!(database = database.name(), "Connected to MongoDB");

        Ok(Self { database })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(doc! {})
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
