//! HTTP API route definitions.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    create_land, delete_land, get_profile, health, list_lands, list_user_lands, login, metrics,
    ready, signup, store_form, update_land, update_profile, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = state.cors;

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        // Accounts
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/profile/:user_id", get(get_profile).put(update_profile))
        // Lands
        .route("/api/lands", get(list_lands).post(create_land))
        .route("/api/lands/user/:user_id", get(list_user_lands))
        .route("/api/lands/:land_id", put(update_land).delete(delete_land))
        // Forms
        .route("/api/form", post(store_form))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
