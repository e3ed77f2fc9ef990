//! HTTP API: account, land and form endpoints plus health, metrics and docs.

pub mod docs;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::utils::shutdown_signal;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::create_router;

/// Bind `addr` and serve the API until a shutdown signal arrives.
pub async fn serve(addr: SocketAddr, state: AppState) -> crate::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
