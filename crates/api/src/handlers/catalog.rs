//! Handlers for the admin catalog editor.
//!
//! Categories are the landing-page tabs; items are the cards under each
//! tab. Every mutation drops the cached site-data payload.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use deal4bank_core::catalog::{
    add_attribute_key, editor_fields, normalize_attribute_keys, orphaned_attributes,
    prune_attributes, relabel_attributes, remove_attribute_key, rename_attribute_key,
    set_attribute_value, validate_category_icon, validate_item_icon, Attribute, EditorField,
};
use deal4bank_core::error::CoreError;
use deal4bank_core::validation::is_blank;
use deal4bank_db::models::category::{Category, SaveCategory};
use deal4bank_db::models::service_item::{SaveServiceItem, ServiceItem};
use deal4bank_db::repositories::{CategoryRepo, ServiceItemRepo};
use deal4bank_db::DocumentStore;

use crate::error::{AppError, AppResult};
use crate::handlers::invalidate_site_data;
use crate::query::{CascadeParams, PruneParams};
use crate::response::{CascadeResponse, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for adding or renaming an attribute key.
#[derive(Debug, Deserialize)]
pub struct AttributeKeyInput {
    pub key: String,
}

/// Body for editing item attribute values. Each label must be one of the
/// category's current keys.
#[derive(Debug, Deserialize)]
pub struct SetAttributeValues {
    pub values: Vec<Attribute>,
}

/// The item editor: one field per category key plus the labels that no
/// longer match a key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEditor {
    pub item: ServiceItem,
    pub fields: Vec<EditorField>,
    pub orphaned: Vec<Attribute>,
}

impl ItemEditor {
    fn new(category: &Category, item: ServiceItem) -> Self {
        Self {
            fields: editor_fields(&category.attribute_keys, &item.attributes),
            orphaned: orphaned_attributes(&category.attribute_keys, &item.attributes),
            item,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn category_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: id.to_string(),
    })
}

async fn require_category(store: &dyn DocumentStore, id: &str) -> AppResult<Category> {
    CategoryRepo::find(store, id)
        .await?
        .ok_or_else(|| category_not_found(id))
}

async fn require_item(store: &dyn DocumentStore, tab_id: &str, id: &str) -> AppResult<ServiceItem> {
    ServiceItemRepo::find(store, tab_id, id)
        .await?
        .ok_or_else(|| item_not_found(id))
}

fn item_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ServiceItem",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/admin/catalog/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/admin/catalog/categories
///
/// Create a category, or update the provided fields when `id` is set.
/// A blank name is a no-op and answers 204.
pub async fn save_category(
    State(state): State<AppState>,
    Json(mut input): Json<SaveCategory>,
) -> AppResult<Response> {
    if is_blank(&input.name) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    if let Some(icon) = &input.icon {
        validate_category_icon(icon).map_err(AppError::BadRequest)?;
    }
    if let Some(keys) = input.attribute_keys.take() {
        input.attribute_keys = Some(normalize_attribute_keys(&keys)?);
    }

    let store = state.store.as_ref();
    let response = match &input.id {
        Some(id) => {
            let category = CategoryRepo::update(store, id, &input)
                .await?
                .ok_or_else(|| category_not_found(id))?;
            tracing::info!(category_id = %category.id, "Category updated");
            Json(DataResponse { data: category }).into_response()
        }
        None => {
            let category = CategoryRepo::create(store, &input).await?;
            tracing::info!(category_id = %category.id, name = %category.name, "Category created");
            (StatusCode::CREATED, Json(DataResponse { data: category })).into_response()
        }
    };

    invalidate_site_data(&state).await;
    Ok(response)
}

/// DELETE /api/admin/catalog/categories/{id}
///
/// Items under the category are not deleted; they stay behind unreachable.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let store = state.store.as_ref();
    let orphaned_items = ServiceItemRepo::count(store, &id).await?;
    let deleted = CategoryRepo::delete(store, &id).await?;

    if deleted {
        tracing::info!(category_id = %id, orphaned_items, "Category deleted");
        invalidate_site_data(&state).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Attribute keys
// ---------------------------------------------------------------------------

/// POST /api/admin/catalog/categories/{id}/keys
pub async fn add_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AttributeKeyInput>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let category = require_category(store, &id).await?;

    let mut keys = category.attribute_keys;
    add_attribute_key(&mut keys, &input.key)?;

    let updated = CategoryRepo::update_keys(store, &id, &keys)
        .await?
        .ok_or_else(|| category_not_found(&id))?;

    invalidate_site_data(&state).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: updated })))
}

/// PUT /api/admin/catalog/categories/{id}/keys/{index}
///
/// Renames the key only. With `?cascade=true`, items carrying the old
/// label are relabelled as well.
pub async fn rename_key(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Query(params): Query<CascadeParams>,
    Json(input): Json<AttributeKeyInput>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let category = require_category(store, &id).await?;

    let mut keys = category.attribute_keys;
    let old_key = rename_attribute_key(&mut keys, index, &input.key)?;
    let new_key = keys[index].clone();

    let updated = CategoryRepo::update_keys(store, &id, &keys)
        .await?
        .ok_or_else(|| category_not_found(&id))?;
    // The key list is already written; a failing item pass must not leave
    // the old payload cached.
    invalidate_site_data(&state).await;

    let mut items_updated = 0;
    if params.cascade && old_key != new_key {
        for mut item in ServiceItemRepo::list(store, &id).await? {
            if relabel_attributes(&mut item.attributes, &old_key, &new_key) {
                ServiceItemRepo::set_attributes(store, &id, &item.id, &item.attributes).await?;
                items_updated += 1;
            }
        }
    }

    tracing::info!(
        category_id = %id,
        old_key = %old_key,
        new_key = %new_key,
        cascade = params.cascade,
        items_updated,
        "Attribute key renamed"
    );
    Ok(Json(CascadeResponse {
        data: updated,
        items_updated,
    }))
}

/// DELETE /api/admin/catalog/categories/{id}/keys/{index}
///
/// Removes the key only. With `?prune=true`, item values under that label
/// are deleted as well.
pub async fn remove_key(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Query(params): Query<PruneParams>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let category = require_category(store, &id).await?;

    let mut keys = category.attribute_keys;
    let removed = remove_attribute_key(&mut keys, index)?;

    let updated = CategoryRepo::update_keys(store, &id, &keys)
        .await?
        .ok_or_else(|| category_not_found(&id))?;
    // The key list is already written; a failing item pass must not leave
    // the old payload cached.
    invalidate_site_data(&state).await;

    let mut items_updated = 0;
    if params.prune {
        for mut item in ServiceItemRepo::list(store, &id).await? {
            if prune_attributes(&mut item.attributes, &removed) {
                ServiceItemRepo::set_attributes(store, &id, &item.id, &item.attributes).await?;
                items_updated += 1;
            }
        }
    }

    tracing::info!(
        category_id = %id,
        key = %removed,
        prune = params.prune,
        items_updated,
        "Attribute key removed"
    );
    Ok(Json(CascadeResponse {
        data: updated,
        items_updated,
    }))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/admin/catalog/categories/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let items = ServiceItemRepo::list(state.store.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/admin/catalog/categories/{id}/items
///
/// Create an item in the active category, or update it when `id` is set.
/// A blank title or no active category is a no-op and answers 204.
pub async fn save_item(
    State(state): State<AppState>,
    Path(tab_id): Path<String>,
    Json(input): Json<SaveServiceItem>,
) -> AppResult<Response> {
    if is_blank(&input.title) || is_blank(&tab_id) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    if let Some(icon) = &input.icon_name {
        validate_item_icon(icon).map_err(AppError::BadRequest)?;
    }

    let store = state.store.as_ref();
    require_category(store, &tab_id).await?;

    let response = match &input.id {
        Some(id) => {
            let item = ServiceItemRepo::update(store, &tab_id, id, &input)
                .await?
                .ok_or_else(|| item_not_found(id))?;
            tracing::info!(category_id = %tab_id, item_id = %item.id, "Item updated");
            Json(DataResponse { data: item }).into_response()
        }
        None => {
            let item = ServiceItemRepo::create(store, &tab_id, &input).await?;
            tracing::info!(category_id = %tab_id, item_id = %item.id, title = %item.title, "Item created");
            (StatusCode::CREATED, Json(DataResponse { data: item })).into_response()
        }
    };

    invalidate_site_data(&state).await;
    Ok(response)
}

/// GET /api/admin/catalog/categories/{id}/items/{item_id}/editor
pub async fn item_editor(
    State(state): State<AppState>,
    Path((tab_id, item_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let category = require_category(store, &tab_id).await?;
    let item = require_item(store, &tab_id, &item_id).await?;

    Ok(Json(DataResponse {
        data: ItemEditor::new(&category, item),
    }))
}

/// PUT /api/admin/catalog/categories/{id}/items/{item_id}/attributes
///
/// Set values for current keys, creating an entry on first edit. Labels
/// that are not current keys are rejected; orphaned values are left as is.
pub async fn set_attribute_values(
    State(state): State<AppState>,
    Path((tab_id, item_id)): Path<(String, String)>,
    Json(input): Json<SetAttributeValues>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let category = require_category(store, &tab_id).await?;
    let mut item = require_item(store, &tab_id, &item_id).await?;

    if let Some(unknown) = input
        .values
        .iter()
        .find(|v| !category.attribute_keys.contains(&v.label))
    {
        return Err(AppError::BadRequest(format!(
            "'{}' is not an attribute key of this category",
            unknown.label
        )));
    }

    for value in &input.values {
        set_attribute_value(&mut item.attributes, &value.label, &value.value);
    }

    let item = ServiceItemRepo::set_attributes(store, &tab_id, &item_id, &item.attributes)
        .await?
        .ok_or_else(|| item_not_found(&item_id))?;

    invalidate_site_data(&state).await;
    Ok(Json(DataResponse {
        data: ItemEditor::new(&category, item),
    }))
}

/// DELETE /api/admin/catalog/categories/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path((tab_id, item_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    if ServiceItemRepo::delete(state.store.as_ref(), &tab_id, &item_id).await? {
        tracing::info!(category_id = %tab_id, item_id = %item_id, "Item deleted");
        invalidate_site_data(&state).await;
    }
    Ok(StatusCode::NO_CONTENT)
}
