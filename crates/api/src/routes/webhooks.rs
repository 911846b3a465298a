use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Provider webhooks mounted at `/api/webhooks`.
///
/// ```text
/// POST /resend    -> receive_provider_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/resend", post(webhooks::receive_provider_event))
}
