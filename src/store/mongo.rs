//! MongoDB-backed document store.

use std::future::IntoFuture;
use std::time::Instant;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Database};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::metrics;

use super::{id_filter, Collection, DocumentStore};

/// Document store over a single MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to `uri` and select `database`.
    ///
    /// The driver connects lazily, so an unreachable server only surfaces on
    /// the first operation (or [`DocumentStore::ping`]).
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        info!(database, "MongoDB client initialized");
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(collection.as_ref())
    }
}

/// Run a store call and record its latency whether or not it succeeds.
async fn timed<T, E>(
    operation: &'static str,
    call: impl IntoFuture<Output = Result<T, E>>,
) -> Result<T, StoreError>
where
    E: Into<StoreError>,
{
    let start = Instant::now();
    let result = call.await;
    metrics::record_store_latency(operation, start);
    result.map_err(Into::into)
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        timed("ping", self.db.run_command(doc! { "ping": 1 })).await?;
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        timed("find_one", self.collection(collection).find_one(filter)).await
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let documents: Vec<Document> = timed("find", async {
            let cursor = self.collection(collection).find(filter).await?;
            let documents = cursor.try_collect::<Vec<Document>>().await?;
            Ok::<_, mongodb::error::Error>(documents)
        })
        .await?;
        debug!(%collection, count = documents.len(), "find complete");
        Ok(documents)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Bson, StoreError> {
        let result = timed("insert_one", self.collection(collection).insert_one(document)).await?;
        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<u64, StoreError> {
        let result = timed(
            "update_one",
            self.collection(collection)
                .update_one(id_filter(id), doc! { "$set": set }),
        )
        .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: Collection, id: ObjectId) -> Result<u64, StoreError> {
        let result = timed("delete_one", self.collection(collection).delete_one(id_filter(id))).await?;
        Ok(result.deleted_count)
    }
}
