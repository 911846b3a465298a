//! Route definitions for the public landing-page reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Public read routes merged at `/api`.
///
/// ```text
/// GET /services     -> get_services
/// GET /site-data    -> get_site_data
/// GET /settings     -> get_settings
/// GET /landing      -> get_landing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(site::get_services))
        .route("/site-data", get(site::get_site_data))
        .route("/settings", get(site::get_settings))
        .route("/landing", get(site::get_landing))
}
