//! Public read endpoints consumed by the landing page.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use deal4bank_core::landing::render_landing;
use deal4bank_core::site::{fallback_company_settings, SITE_DATA_CACHE_KEY};
use deal4bank_db::repositories::{CatalogRepo, SettingsRepo};
use deal4bank_db::StoreError;

use crate::error::AppResult;
use crate::query::TabParams;
use crate::state::AppState;

/// GET /api/services
///
/// The aggregated catalog. Any failed read fails the whole request.
pub async fn get_services(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let payload =
        CatalogRepo::load_services(state.store.as_ref(), &state.config.catalog_heading).await?;
    Ok(Json(payload))
}

/// GET /api/landing?tab=<id>
///
/// The rendered landing view for the requested (or first visible) tab.
pub async fn get_landing(
    State(state): State<AppState>,
    Query(params): Query<TabParams>,
) -> AppResult<impl IntoResponse> {
    let payload =
        CatalogRepo::load_services(state.store.as_ref(), &state.config.catalog_heading).await?;
    Ok(Json(render_landing(&payload, params.tab.as_deref())))
}

/// GET /api/settings
///
/// The stored company profile, or 404 when it was never saved.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<Response> {
    match SettingsRepo::company(state.store.as_ref()).await? {
        Some(settings) => Ok(Json(settings).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Settings not found" })),
        )
            .into_response()),
    }
}

/// GET /api/site-data
///
/// Company settings and catalog in one payload, served from the site cache
/// when fresh. A failed read answers with the built-in fallback instead of
/// an error and is not cached.
pub async fn get_site_data(State(state): State<AppState>) -> Json<Value> {
    if let Some(cached) = state.site_cache.get(SITE_DATA_CACHE_KEY).await {
        tracing::debug!(key = SITE_DATA_CACHE_KEY, "Site data served from cache");
        return Json(cached);
    }

    let generation = state.site_cache.generation();
    match load_site_data(&state).await {
        Ok(data) => {
            let stored = state
                .site_cache
                .insert_if_current(SITE_DATA_CACHE_KEY, data.clone(), generation)
                .await;
            if !stored {
                tracing::debug!(key = SITE_DATA_CACHE_KEY, "Site data changed during load, not cached");
            }
            Json(data)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load site data, serving fallback");
            Json(fallback_site_data(&state.config.catalog_heading))
        }
    }
}

async fn load_site_data(state: &AppState) -> Result<Value, StoreError> {
    let store = state.store.as_ref();
    let (settings, services) = tokio::try_join!(
        SettingsRepo::company(store),
        CatalogRepo::load_services(store, &state.config.catalog_heading),
    )?;

    let settings = match settings {
        Some(settings) => serde_json::to_value(settings)
            .map_err(|e| StoreError::Encode(e.to_string()))?,
        None => fallback_company_settings(),
    };
    let services =
        serde_json::to_value(services).map_err(|e| StoreError::Encode(e.to_string()))?;

    Ok(json!({ "settings": settings, "services": services }))
}

/// Payload served when the store cannot be read.
pub fn fallback_site_data(heading: &str) -> Value {
    json!({
        "settings": fallback_company_settings(),
        "services": { "heading": heading, "tabs": [] },
    })
}
