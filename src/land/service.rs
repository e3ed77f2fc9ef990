//! Land listing operations.

use std::sync::Arc;

use mongodb::bson::{doc, to_bson, to_document, Document};
use tracing::{debug, info, instrument};

use crate::error::{ApiError, Resource, StoreError};
use crate::metrics;
use crate::store::{id_filter, id_to_string, Collection, DocumentStore};
use crate::utils::{parse_object_id, timestamp_now};

use super::types::{LandUpdate, NewLand};

/// Land listing operations. Cheap to clone.
#[derive(Clone)]
pub struct Lands {
    store: Arc<dyn DocumentStore>,
}

impl Lands {
    /// Create land operations over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every listing, in storage order.
    pub async fn list_lands(&self) -> Result<Vec<Document>, ApiError> {
        Ok(self.store.find(Collection::Lands, doc! {}).await?)
    }

    /// Listings whose `owner_id` is exactly `owner_id`.
    #[instrument(skip(self))]
    pub async fn list_lands_by_owner(&self, owner_id: &str) -> Result<Vec<Document>, ApiError> {
        let lands = self
            .store
            .find(Collection::Lands, doc! { "owner_id": owner_id })
            .await?;
        debug!(count = lands.len(), "Owner listings fetched");
        Ok(lands)
    }

    /// Insert a listing and return it as stored.
    #[instrument(skip(self, land), fields(owner_id = %land.owner_id))]
    pub async fn create_land(&self, land: NewLand) -> Result<Document, ApiError> {
        let now = timestamp_now();
        let mut document = to_document(&land)?;
        document.insert("created_at", now.clone());
        document.insert("updated_at", now);

        let inserted = self.store.insert_one(Collection::Lands, document).await?;
        let created = self
            .store
            .find_one(Collection::Lands, doc! { "_id": inserted.clone() })
            .await?
            .ok_or_else(|| StoreError::MissingAfterInsert(id_to_string(&inserted)))?;

        info!(land_id = %id_to_string(&inserted), "Land created");
        metrics::increment(metrics::METRIC_LANDS_CREATED);
        Ok(created)
    }

    /// Merge non-null fields into a listing and return the result.
    ///
    /// `_id` is never rewritten; `updated_at` is always refreshed.
    #[instrument(skip(self, fields))]
    pub async fn update_land(&self, land_id: &str, fields: LandUpdate) -> Result<Document, ApiError> {
        let id = parse_object_id(land_id, Resource::Land)?;

        let mut set = Document::new();
        for (key, value) in fields.0 {
            if value.is_null() || key == "_id" {
                continue;
            }
            set.insert(key, to_bson(&value)?);
        }
        set.insert("updated_at", timestamp_now());

        let matched = self.store.update_one(Collection::Lands, id, set).await?;
        if matched == 0 {
            return Err(ApiError::NotFound(Resource::Land));
        }

        let updated = self
            .store
            .find_one(Collection::Lands, id_filter(id))
            .await?
            .ok_or(ApiError::NotFound(Resource::Land))?;
        info!("Land updated");
        metrics::increment(metrics::METRIC_LANDS_UPDATED);
        Ok(updated)
    }

    /// Remove a single listing.
    #[instrument(skip(self))]
    pub async fn delete_land(&self, land_id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(land_id, Resource::Land)?;
        let deleted = self.store.delete_one(Collection::Lands, id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(Resource::Land));
        }

        info!("Land deleted");
        metrics::increment(metrics::METRIC_LANDS_DELETED);
        Ok(())
    }
}
