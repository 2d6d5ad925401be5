//! HTTP server for the review dashboard.
//!
//! One route: `GET /` returns the currently published snapshot as JSON with
//! a permissive cross-origin header. Serving never triggers a refresh and
//! never touches the network; the handler only reads the shared cache.
//!
//! # Endpoints
//!
//! - `GET /` - Returns the published snapshot (`application/json`)

use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::SnapshotCache;

pub mod snapshot;

pub use snapshot::snapshot_handler;

/// Shared application state, passed to handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    cache: SnapshotCache,
}

impl AppState {
    /// Creates a new `AppState` reading from the given cache.
    pub fn new(cache: SnapshotCache) -> Self {
        AppState { cache }
    }

    /// Returns the snapshot cache.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }
}

/// Builds the axum Router.
pub fn build_router(app_state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(snapshot_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state)
}
