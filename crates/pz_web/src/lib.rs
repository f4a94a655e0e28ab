use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;
pub mod views;

pub use state::{AppState, WebConfig};

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/find", get(handlers::find).post(handlers::find))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> pz_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🍕 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use pz_core::{Result, Error};
    pub use crate::{AppState, WebConfig};
}
