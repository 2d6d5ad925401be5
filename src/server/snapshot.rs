//! Snapshot endpoint.
//!
//! Returns whatever the refresh task last published. The handler performs
//! no network calls and takes no lock beyond the cache's swap-scoped one,
//! so reads stay independent of an in-progress refresh.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use super::AppState;

/// Snapshot handler.
///
/// Returns the current published snapshot, which is always a well-formed
/// JSON array - possibly the initial empty one if no refresh cycle has
/// completed yet. Never an error response.
pub async fn snapshot_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let snapshot = app_state.cache().load();
    ([(header::CONTENT_TYPE, "application/json")], snapshot)
}
