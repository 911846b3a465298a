use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard and maintenance routes merged into `/api/admin`.
///
/// ```text
/// GET  /dashboard           -> get_dashboard
/// POST /cache/invalidate    -> invalidate_cache
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/cache/invalidate", post(dashboard::invalidate_cache))
}
