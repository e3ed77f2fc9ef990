//! Free-form submissions, stored without a schema.

use std::sync::Arc;

use mongodb::bson::to_document;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::metrics;
use crate::store::{id_to_string, Collection, DocumentStore};

/// Form submission body: `{"data": {...}}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FormSubmission {
    /// Stored verbatim.
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
}

/// Form storage operations.
#[derive(Clone)]
pub struct Forms {
    store: Arc<dyn DocumentStore>,
}

impl Forms {
    /// Create form operations over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert the mapping unchanged. Returns the stored identifier.
    #[instrument(skip(self, data), fields(keys = data.len()))]
    pub async fn store_form(&self, data: Map<String, Value>) -> Result<String, ApiError> {
        let document = to_document(&data)?;
        let id = self.store.insert_one(Collection::Forms, document).await?;
        let form_id = id_to_string(&id);
        info!(%form_id, "Form stored");
        metrics::increment(metrics::METRIC_FORMS_STORED);
        Ok(form_id)
    }
}
