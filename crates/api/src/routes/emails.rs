use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::emails;
use crate::state::AppState;

/// Inbox routes mounted at `/api/admin/emails`.
///
/// ```text
/// GET   /                  -> list_emails
/// POST  /send              -> send_email
/// POST  /refine            -> refine_draft
/// GET   /{id}              -> get_email
/// PATCH /{id}/read         -> mark_read
/// PATCH /{id}/star         -> toggle_star
/// PATCH /{id}/status       -> set_status
/// POST  /{id}/reply        -> reply_email
/// POST  /{id}/summarize    -> summarize_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(emails::list_emails))
        .route("/send", post(emails::send_email))
        .route("/refine", post(emails::refine_draft))
        .route("/{id}", get(emails::get_email))
        .route("/{id}/read", patch(emails::mark_read))
        .route("/{id}/star", patch(emails::toggle_star))
        .route("/{id}/status", patch(emails::set_status))
        .route("/{id}/reply", post(emails::reply_email))
        .route("/{id}/summarize", post(emails::summarize_email))
}
