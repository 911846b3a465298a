//! Repository for the `services_tabs` collection.

use serde_json::{json, Map, Value};
use deal4bank_core::catalog::DEFAULT_CATEGORY_ICON;

use super::{decode_all, decode_opt};
use crate::collections::CATEGORIES;
use crate::models::category::{Category, SaveCategory};
use crate::store::{body, Direction, DocumentStore, ListQuery, StoreError};

/// Provides CRUD operations for catalog categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category, ordered by `order` ascending.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Category>, StoreError> {
        let query = ListQuery::new().order_by("order", Direction::Asc);
        decode_all(store.list(CATEGORIES, &query).await?)
    }

    pub async fn find(store: &dyn DocumentStore, id: &str) -> Result<Option<Category>, StoreError> {
        decode_opt(store.get(CATEGORIES, id).await?)
    }

    pub async fn count(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        store.count(CATEGORIES, &ListQuery::new()).await
    }

    /// Create a category. Unset fields default to the end of the tab list,
    /// visible, with the default icon and no attribute keys.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &SaveCategory,
    ) -> Result<Category, StoreError> {
        let order = match input.order {
            Some(order) => order,
            None => Self::count(store).await? as i64,
        };
        let doc = store
            .create(
                CATEGORIES,
                body(json!({
                    "name": input.name,
                    "icon": input.icon.as_deref().unwrap_or(DEFAULT_CATEGORY_ICON),
                    "order": order,
                    "visible": input.visible.unwrap_or(true),
                    "attributeKeys": input.attribute_keys.clone().unwrap_or_default(),
                })),
            )
            .await?;
        doc.decode()
    }

    /// Apply the provided fields to an existing category.
    ///
    /// Returns `None` if the category does not exist.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &SaveCategory,
    ) -> Result<Option<Category>, StoreError> {
        let mut patch = Map::new();
        patch.insert("name".into(), Value::String(input.name.clone()));
        if let Some(icon) = &input.icon {
            patch.insert("icon".into(), Value::String(icon.clone()));
        }
        if let Some(keys) = &input.attribute_keys {
            patch.insert("attributeKeys".into(), json!(keys));
        }
        if let Some(order) = input.order {
            patch.insert("order".into(), json!(order));
        }
        if let Some(visible) = input.visible {
            patch.insert("visible".into(), Value::Bool(visible));
        }
        decode_opt(store.update(CATEGORIES, id, patch).await?)
    }

    /// Replace the category's attribute key list.
    pub async fn update_keys(
        store: &dyn DocumentStore,
        id: &str,
        keys: &[String],
    ) -> Result<Option<Category>, StoreError> {
        let patch = body(json!({ "attributeKeys": keys }));
        decode_opt(store.update(CATEGORIES, id, patch).await?)
    }

    /// Delete a category. Its items are left in place.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete(CATEGORIES, id).await
    }
}
