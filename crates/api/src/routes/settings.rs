use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/api/admin/settings`.
///
/// ```text
/// GET /company    -> get_company
/// PUT /company    -> save_company
/// GET /global     -> get_global
/// PUT /global     -> save_global
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/company",
            get(settings::get_company).put(settings::save_company),
        )
        .route("/global", get(settings::get_global).put(settings::save_global))
}
