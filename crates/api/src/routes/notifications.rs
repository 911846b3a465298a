use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes mounted at `/api/admin/notifications`.
///
/// ```text
/// GET   /                 -> list_notifications
/// GET   /unread-count     -> unread_count
/// POST  /read-all         -> mark_all_read
/// PATCH /{id}/read        -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/unread-count", get(notifications::unread_count))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/{id}/read", patch(notifications::mark_read))
}
