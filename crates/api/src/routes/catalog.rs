//! Route definitions for the admin catalog editor.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog editor routes mounted at `/api/admin/catalog`.
///
/// ```text
/// GET    /categories                                  -> list_categories
/// POST   /categories                                  -> save_category
/// DELETE /categories/{id}                             -> delete_category
/// POST   /categories/{id}/keys                        -> add_key
/// PUT    /categories/{id}/keys/{index}                -> rename_key
/// DELETE /categories/{id}/keys/{index}                -> remove_key
/// GET    /categories/{id}/items                       -> list_items
/// POST   /categories/{id}/items                       -> save_item
/// DELETE /categories/{id}/items/{item_id}             -> delete_item
/// GET    /categories/{id}/items/{item_id}/editor      -> item_editor
/// PUT    /categories/{id}/items/{item_id}/attributes  -> set_attribute_values
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::save_category),
        )
        .route("/categories/{id}", delete(catalog::delete_category))
        .route("/categories/{id}/keys", post(catalog::add_key))
        .route(
            "/categories/{id}/keys/{index}",
            put(catalog::rename_key).delete(catalog::remove_key),
        )
        .route(
            "/categories/{id}/items",
            get(catalog::list_items).post(catalog::save_item),
        )
        .route(
            "/categories/{id}/items/{item_id}",
            delete(catalog::delete_item),
        )
        .route(
            "/categories/{id}/items/{item_id}/editor",
            get(catalog::item_editor),
        )
        .route(
            "/categories/{id}/items/{item_id}/attributes",
            put(catalog::set_attribute_values),
        )
}
