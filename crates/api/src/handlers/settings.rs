//! Handlers for the admin settings page.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use deal4bank_core::error::CoreError;
use deal4bank_db::models::settings::{CompanySettings, GlobalSettings, COMPANY_ID};
use deal4bank_db::repositories::SettingsRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::invalidate_site_data;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/settings/company
pub async fn get_company(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::company(state.store.as_ref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Settings",
                id: COMPANY_ID.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/admin/settings/company
///
/// Replace the company profile. The public site data is refreshed.
pub async fn save_company(
    State(state): State<AppState>,
    Json(input): Json<CompanySettings>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::save_company(state.store.as_ref(), &input).await?;
    tracing::info!(name = %settings.name, "Company settings saved");
    invalidate_site_data(&state).await;
    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/admin/settings/global
pub async fn get_global(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::global(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/admin/settings/global
pub async fn save_global(
    State(state): State<AppState>,
    Json(input): Json<GlobalSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::save_global(state.store.as_ref(), &input).await?;
    tracing::info!(maintenance_mode = settings.maintenance_mode, "Global settings saved");
    Ok(Json(DataResponse { data: settings }))
}
