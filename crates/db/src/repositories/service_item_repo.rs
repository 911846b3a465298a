//! Repository for the per-category `items` sub-collections.

use serde_json::{json, Map, Value};
use deal4bank_core::catalog::{Attribute, DEFAULT_ITEM_ICON};

use crate::collections::items;
use crate::models::service_item::{SaveServiceItem, ServiceItem};
use crate::store::{body, Direction, Document, DocumentStore, ListQuery, StoreError};

/// Provides CRUD operations for the items of one category.
pub struct ServiceItemRepo;

/// Decode an item, filling `tabId` from its collection path when the
/// document does not carry it.
fn decode_item(doc: &Document, tab_id: &str) -> Result<ServiceItem, StoreError> {
    let mut item: ServiceItem = doc.decode()?;
    if item.tab_id.is_empty() {
        item.tab_id = tab_id.to_string();
    }
    Ok(item)
}

fn decode_item_opt(doc: Option<Document>, tab_id: &str) -> Result<Option<ServiceItem>, StoreError> {
    doc.as_ref().map(|d| decode_item(d, tab_id)).transpose()
}

impl ServiceItemRepo {
    /// List a category's items, ordered by `order` ascending.
    pub async fn list(
        store: &dyn DocumentStore,
        tab_id: &str,
    ) -> Result<Vec<ServiceItem>, StoreError> {
        let query = ListQuery::new().order_by("order", Direction::Asc);
        store
            .list(&items(tab_id), &query)
            .await?
            .iter()
            .map(|d| decode_item(d, tab_id))
            .collect()
    }

    pub async fn find(
        store: &dyn DocumentStore,
        tab_id: &str,
        id: &str,
    ) -> Result<Option<ServiceItem>, StoreError> {
        decode_item_opt(store.get(&items(tab_id), id).await?, tab_id)
    }

    pub async fn count(store: &dyn DocumentStore, tab_id: &str) -> Result<u64, StoreError> {
        store.count(&items(tab_id), &ListQuery::new()).await
    }

    /// Create an item at the end of the category, visible, with the default
    /// icon and the given attributes (or none).
    pub async fn create(
        store: &dyn DocumentStore,
        tab_id: &str,
        input: &SaveServiceItem,
    ) -> Result<ServiceItem, StoreError> {
        let order = match input.order {
            Some(order) => order,
            None => Self::count(store, tab_id).await? as i64,
        };
        let doc = store
            .create(
                &items(tab_id),
                body(json!({
                    "tabId": tab_id,
                    "title": input.title,
                    "iconName": input.icon_name.as_deref().unwrap_or(DEFAULT_ITEM_ICON),
                    "order": order,
                    "visible": input.visible.unwrap_or(true),
                    "attributes": input.attributes.clone().unwrap_or_default(),
                })),
            )
            .await?;
        decode_item(&doc, tab_id)
    }

    /// Apply the provided fields to an existing item.
    ///
    /// Returns `None` if the item does not exist in this category.
    pub async fn update(
        store: &dyn DocumentStore,
        tab_id: &str,
        id: &str,
        input: &SaveServiceItem,
    ) -> Result<Option<ServiceItem>, StoreError> {
        let mut patch = Map::new();
        patch.insert("title".into(), Value::String(input.title.clone()));
        if let Some(icon) = &input.icon_name {
            patch.insert("iconName".into(), Value::String(icon.clone()));
        }
        if let Some(attributes) = &input.attributes {
            patch.insert("attributes".into(), json!(attributes));
        }
        if let Some(order) = input.order {
            patch.insert("order".into(), json!(order));
        }
        if let Some(visible) = input.visible {
            patch.insert("visible".into(), Value::Bool(visible));
        }
        decode_item_opt(store.update(&items(tab_id), id, patch).await?, tab_id)
    }

    /// Replace an item's attribute list.
    pub async fn set_attributes(
        store: &dyn DocumentStore,
        tab_id: &str,
        id: &str,
        attributes: &[Attribute],
    ) -> Result<Option<ServiceItem>, StoreError> {
        let patch = body(json!({ "attributes": attributes }));
        decode_item_opt(store.update(&items(tab_id), id, patch).await?, tab_id)
    }

    pub async fn delete(
        store: &dyn DocumentStore,
        tab_id: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        store.delete(&items(tab_id), id).await
    }
}
