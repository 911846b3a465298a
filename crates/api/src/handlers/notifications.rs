//! Handlers for the admin notification bell.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use deal4bank_core::error::CoreError;
use deal4bank_db::models::notification::NotificationListParams;
use deal4bank_db::repositories::notification_repo::DEFAULT_LIMIT;
use deal4bank_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// GET /api/admin/notifications?unread=&limit=
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let unread_only = params.unread.unwrap_or(false);
    let notifications =
        NotificationRepo::list_recent(state.store.as_ref(), unread_only, limit).await?;
    Ok(Json(DataResponse { data: notifications }))
}

/// GET /api/admin/notifications/unread-count
pub async fn unread_count(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(state.store.as_ref()).await?;
    Ok(Json(DataResponse {
        data: json!({ "unreadCount": count }),
    }))
}

/// PATCH /api/admin/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let notification = NotificationRepo::mark_read(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Notification",
                id: id.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: notification }))
}

/// POST /api/admin/notifications/read-all
pub async fn mark_all_read(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_all_read(state.store.as_ref()).await?;
    tracing::info!(updated, "Marked all notifications read");
    Ok(Json(DataResponse {
        data: json!({ "updated": updated }),
    }))
}
