//! Generic repository over record collections
//!
//! One `Repository<T>` per record type; the collection name comes from
//! the type, so callers never pass collection strings around.

use std::marker::PhantomData;
use tracing::debug;
use validator::Validate;

use super::SharedStore;
use crate::errors::{AppError, Result};
use crate::metrics;
use crate::schema::{record_from_document, record_to_document, Record, ValidationFailure};

/// Typed insert / fetch-all access to `T::COLLECTION`
pub struct Repository<T> {
    store: SharedStore,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    /// Create a new repository over the given store
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Create a repository from a possibly absent connection handle
    pub fn from_state(store: Option<&SharedStore>) -> Result<Self> {
        store
            .cloned()
            .map(Self::new)
            .ok_or(AppError::DatabaseUnavailable)
    }

    /// Insert a record, returning the store-assigned identifier
    pub async fn insert(&self, record: &T) -> Result<String> {
        // Constraints hold at write time regardless of how the record was built
        record.validate().map_err(ValidationFailure::from)?;

        let document = record_to_document(record)?;
        let id = self.store.insert_one(T::COLLECTION, document).await?;

        debug!(collection = T::COLLECTION, id = %id, "Document inserted");
        Ok(id)
    }

    /// Every stored record, identifiers stripped and schema-checked
    pub async fn fetch_all(&self) -> Result<Vec<T>> {
        let documents = self.store.find_all(T::COLLECTION).await?;
        let count = documents.len();

        let records = documents
            .into_iter()
            .map(|document| {
                record_from_document::<T>(document).map_err(|failure| AppError::InvalidDocument {
                    collection: T::COLLECTION.to_string(),
                    message: failure.to_string(),
                })
            })
            .collect::<Result<Vec<T>>>()?;

        metrics::record_documents_fetched(T::COLLECTION, count);
        debug!(collection = T::COLLECTION, count, "Documents fetched");
        Ok(records)
    }
}
