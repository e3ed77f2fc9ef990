//! Document storage.
//!
//! This module handles:
//! - The [`DocumentStore`] seam every handler goes through
//! - MongoDB-backed storage for deployments
//! - In-memory storage for tests and local runs
//! - Collection/role identifiers and document conversion

pub mod memory;
pub mod mongo;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::error::{FarmError, StoreError};

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use types::{document_to_json, id_filter, id_to_string, Collection, Role};

/// Schema-less document storage over named collections.
///
/// Implementations must be safe to share across concurrent requests. No
/// operation spans more than one document and there are no transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// First document whose top-level fields equal every entry of `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// All matching documents, in storage order.
    async fn find(&self, collection: Collection, filter: Document)
        -> Result<Vec<Document>, StoreError>;

    /// Insert a document, assigning an `_id` when it has none.
    async fn insert_one(&self, collection: Collection, document: Document)
        -> Result<Bson, StoreError>;

    /// Apply `$set` semantics to the document with `id`. Returns the matched count.
    async fn update_one(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<u64, StoreError>;

    /// Remove the document with `id`. Returns the deleted count.
    async fn delete_one(&self, collection: Collection, id: ObjectId) -> Result<u64, StoreError>;
}

/// Build the store selected by `config`.
pub async fn connect(config: &Config) -> crate::Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Mongo => {
            let uri = config
                .mongo_uri
                .as_deref()
                .ok_or_else(|| FarmError::InvalidConfig("MONGO_URI is not set".to_string()))?;
            info!(
                uri = %config.redacted_mongo_uri().unwrap_or_default(),
                database = %config.mongo_database,
                "Connecting to MongoDB"
            );
            let store = MongoStore::connect(uri, &config.mongo_database).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
