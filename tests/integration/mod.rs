//! Integration tests for the farmland API.
//!
//! The in-memory tests always run. The MongoDB tests need a reachable server:
//! Run with: MONGO_URI=mongodb://localhost:27017 cargo test --test integration -- --ignored
//!
//! Note: MongoDB tests write to a throwaway database named per test run and
//! drop it afterwards.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

use farmland_api::api::{create_router, AppState};
use farmland_api::store::{DocumentStore, MemoryStore, MongoStore};

/// Router over a fresh in-memory store.
fn memory_app() -> Router {
    create_router(AppState::new(Arc::new(MemoryStore::new())))
}

/// Router over a live MongoDB, if MONGO_URI is set, plus a handle on its
/// throwaway database.
async fn mongo_app() -> Option<(Router, Database)> {
    dotenvy::dotenv().ok();
    let uri = std::env::var("MONGO_URI").ok()?;
    let database = format!("farm_test_{}", ObjectId::new().to_hex());

    let store = MongoStore::connect(&uri, &database).await.ok()?;
    if store.ping().await.is_err() {
        return None;
    }
    let scratch = Client::with_uri_str(&uri).await.ok()?.database(&database);
    Some((create_router(AppState::new(Arc::new(store))), scratch))
}

/// Drop a throwaway test database.
async fn drop_database(database: Database) {
    let name = database.name().to_string();
    database
        .drop()
        .await
        .unwrap_or_else(|e| panic!("failed to drop {name}: {e}"));
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn ids(lands: &Value) -> Vec<String> {
    let mut ids: Vec<String> = lands
        .as_array()
        .unwrap()
        .iter()
        .map(|land| land["_id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

/// Signup, duplicate signup, then profile fetch by the returned id.
async fn signup_conflict_and_profile(app: &Router) {
    let body = json!({ "email": "a@x.com", "password": "p", "full_name": "A", "role": "farmer" });

    let (status, created) = call(app, Method::POST, "/api/signup", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let user_id = created["user_id"].as_str().unwrap().to_string();

    let (status, _) = call(app, Method::POST, "/api/signup", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, profile) = call(app, Method::GET, &format!("/api/profile/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["full_name"], "A");
}

/// Owner filtering, partial update and delete over several listings.
async fn land_listing_flow(app: &Router) {
    let mut owned = Vec::new();
    for (owner, title) in [("o1", "a"), ("o2", "b"), ("o1", "c")] {
        let (status, land) = call(
            app,
            Method::POST,
            "/api/lands",
            Some(json!({ "owner_id": owner, "title": title, "location": "x", "area": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        if owner == "o1" {
            owned.push(land["_id"].as_str().unwrap().to_string());
        }
    }
    owned.sort();

    let (_, listed) = call(app, Method::GET, "/api/lands/user/o1", None).await;
    assert_eq!(ids(&listed), owned);

    let target = owned[0].clone();
    let (status, updated) = call(
        app,
        Method::PUT,
        &format!("/api/lands/{target}"),
        Some(json!({ "price_per_acre": 900.0, "location": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["location"], "x");
    assert_eq!(updated["price_per_acre"], 900.0);

    let (status, _) = call(app, Method::DELETE, &format!("/api/lands/{target}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = call(app, Method::GET, "/api/lands/user/o1", None).await;
    assert!(!ids(&listed).contains(&target));

    let (status, _) = call(app, Method::DELETE, &format!("/api/lands/{target}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn memory_signup_conflict_and_profile() {
    signup_conflict_and_profile(&memory_app()).await;
}

#[tokio::test]
async fn memory_land_listing_flow() {
    land_listing_flow(&memory_app()).await;
}

#[tokio::test]
async fn memory_farmer_and_landowner_may_share_email() {
    let app = memory_app();
    for role in ["farmer", "landowner"] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/signup",
            Some(json!({ "email": "s@x.com", "password": "p", "full_name": "S", "role": role })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "signup as {role}");
    }

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({ "email": "s@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "farmer");
}

#[tokio::test]
#[ignore = "requires MONGO_URI"]
async fn mongo_signup_conflict_and_profile() {
    let Some((app, database)) = mongo_app().await else {
        println!("Skipping: MONGO_URI not set or unreachable");
        return;
    };
    signup_conflict_and_profile(&app).await;
    drop_database(database).await;
}

#[tokio::test]
#[ignore = "requires MONGO_URI"]
async fn mongo_land_listing_flow() {
    let Some((app, database)) = mongo_app().await else {
        println!("Skipping: MONGO_URI not set or unreachable");
        return;
    };
    land_listing_flow(&app).await;
    drop_database(database).await;
}

#[tokio::test]
#[ignore = "requires MONGO_URI"]
async fn mongo_test_database_is_dropped() {
    let Some((app, database)) = mongo_app().await else {
        println!("Skipping: MONGO_URI not set or unreachable");
        return;
    };
    signup_conflict_and_profile(&app).await;

    let name = database.name().to_string();
    drop_database(database).await;

    let uri = std::env::var("MONGO_URI").unwrap();
    let client = Client::with_uri_str(&uri).await.unwrap();

    let remaining = client.list_database_names().await.unwrap();
    assert!(!remaining.contains(&name));
}
