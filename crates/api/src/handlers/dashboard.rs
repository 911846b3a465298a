//! Admin dashboard summary and cache maintenance.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use deal4bank_core::inquiry::InquiryStatus;
use deal4bank_core::site::SITE_DATA_CACHE_KEY;
use deal4bank_db::repositories::{EmailRepo, InquiryRepo, NotificationRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Inquiry counts per status.
#[derive(Debug, Serialize)]
pub struct InquiryCounts {
    pub pending: u64,
    pub contacted: u64,
    pub closed: u64,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub inquiries: InquiryCounts,
    pub unread_emails: u64,
    pub unread_notifications: u64,
    pub live_sessions: usize,
}

/// GET /api/admin/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let (pending, contacted, closed, unread_emails, unread_notifications) = tokio::try_join!(
        InquiryRepo::count_by_status(store, InquiryStatus::Pending),
        InquiryRepo::count_by_status(store, InquiryStatus::Contacted),
        InquiryRepo::count_by_status(store, InquiryStatus::Closed),
        EmailRepo::count_unread_inbox(store),
        NotificationRepo::unread_count(store),
    )?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            inquiries: InquiryCounts {
                pending,
                contacted,
                closed,
            },
            unread_emails,
            unread_notifications,
            live_sessions: state.ws_manager.connection_count().await,
        },
    }))
}

/// POST /api/admin/cache/invalidate
///
/// Force the next site-data read to go to the store.
pub async fn invalidate_cache(State(state): State<AppState>) -> impl IntoResponse {
    let invalidated = state.site_cache.invalidate(SITE_DATA_CACHE_KEY).await;
    tracing::info!(key = SITE_DATA_CACHE_KEY, invalidated, "Site data cache invalidated on request");
    Json(DataResponse {
        data: json!({ "key": SITE_DATA_CACHE_KEY, "invalidated": invalidated }),
    })
}
