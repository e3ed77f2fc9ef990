//! In-memory document store for tests and local runs.
//!
//! Mirrors the subset of MongoDB behavior the handlers rely on: top-level
//! equality filters, `_id` assignment on insert, and `$set` updates.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::error::StoreError;

use super::{Collection, DocumentStore};

/// Process-local document store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .get(&collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Drop all documents.
    pub fn clear(&self) {
        self.collections.clear();
    }
}

fn filter_matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn has_id(document: &Document, id: ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(oid)) if *oid == id)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|document| filter_matches(document, &filter))
                .cloned()
        }))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|document| filter_matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<Bson, StoreError> {
        let id = match document.get("_id").cloned() {
            Some(id) => id,
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert("_id", id.clone());
                for (key, value) in document {
                    with_id.insert(key, value);
                }
                document = with_id;
                id
            }
        };

        let mut docs = self.collections.entry(collection).or_default();
        if docs.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateKey(id.to_string()));
        }
        docs.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<u64, StoreError> {
        let Some(mut docs) = self.collections.get_mut(&collection) else {
            return Ok(0);
        };
        match docs.iter_mut().find(|document| has_id(document, id)) {
            Some(document) => {
                for (key, value) in set {
                    document.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: Collection, id: ObjectId) -> Result<u64, StoreError> {
        let Some(mut docs) = self.collections.get_mut(&collection) else {
            return Ok(0);
        };
        match docs.iter().position(|document| has_id(document, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
