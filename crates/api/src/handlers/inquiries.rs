//! Handlers for lead intake and the admin inquiry list.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use deal4bank_core::error::CoreError;
use deal4bank_core::inquiry::{InquiryStatus, InquirySubmission};
use deal4bank_db::models::inquiry::{InquiryListParams, SetFollowUp, UpdateInquiryStatus};
use deal4bank_db::repositories::InquiryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn inquiry_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Inquiry",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// POST /api/inquiries
///
/// Validate the lead form and record a pending inquiry together with its
/// admin notification. The body is read as untyped JSON so wrongly typed
/// fields come back as field errors.
pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let input = InquirySubmission::from_json(&body)?;

    let (inquiry, notification) =
        InquiryRepo::create_with_notification(state.store.as_ref(), &input).await?;

    tracing::info!(
        inquiry_id = %inquiry.id,
        notification_id = %notification.id,
        service = %inquiry.service,
        "Inquiry recorded"
    );

    Ok(Json(json!({
        "success": true,
        "message": "Inquiry received and recorded",
        "id": inquiry.id,
    })))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/admin/inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    Query(params): Query<InquiryListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .map(InquiryStatus::parse)
        .transpose()?;
    let inquiries = InquiryRepo::list(state.store.as_ref(), status, params.limit).await?;
    Ok(Json(DataResponse { data: inquiries }))
}

/// GET /api/admin/inquiries/{id}
pub async fn get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let inquiry = InquiryRepo::find(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| inquiry_not_found(&id))?;
    Ok(Json(DataResponse { data: inquiry }))
}

/// PATCH /api/admin/inquiries/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInquiryStatus>,
) -> AppResult<impl IntoResponse> {
    let status = InquiryStatus::parse(&input.status)?;
    let inquiry = InquiryRepo::update_status(state.store.as_ref(), &id, status)
        .await?
        .ok_or_else(|| inquiry_not_found(&id))?;

    tracing::info!(inquiry_id = %id, status = status.as_str(), "Inquiry status updated");
    Ok(Json(DataResponse { data: inquiry }))
}

/// PATCH /api/admin/inquiries/{id}/follow-up
///
/// Set the follow-up date, or clear it with `null`.
pub async fn set_follow_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SetFollowUp>,
) -> AppResult<impl IntoResponse> {
    let inquiry = InquiryRepo::set_follow_up(state.store.as_ref(), &id, input.follow_up_date)
        .await?
        .ok_or_else(|| inquiry_not_found(&id))?;
    Ok(Json(DataResponse { data: inquiry }))
}

/// DELETE /api/admin/inquiries/{id}
pub async fn delete_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !InquiryRepo::delete(state.store.as_ref(), &id).await? {
        return Err(inquiry_not_found(&id));
    }
    tracing::info!(inquiry_id = %id, "Inquiry deleted");
    Ok(StatusCode::NO_CONTENT)
}
