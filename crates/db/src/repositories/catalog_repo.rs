//! Aggregated catalog read: every category with its items.

use futures::future::try_join_all;
use deal4bank_core::catalog::{
    icon_or, CatalogEntry, CatalogTab, ServicesPayload, FALLBACK_CATEGORY_ICON, FALLBACK_ITEM_ICON,
};

use super::{CategoryRepo, ServiceItemRepo};
use crate::store::{DocumentStore, StoreError};

/// Reads the whole catalog in one pass.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Load every category (ordered) with its items (ordered).
    ///
    /// Hidden categories and items are included with their `visible` flag;
    /// filtering is up to the renderer. Any failed read fails the whole
    /// call.
    pub async fn load_services(
        store: &dyn DocumentStore,
        heading: &str,
    ) -> Result<ServicesPayload, StoreError> {
        let categories = CategoryRepo::list(store).await?;
        let item_lists = try_join_all(
            categories
                .iter()
                .map(|category| ServiceItemRepo::list(store, &category.id)),
        )
        .await?;

        let tabs = categories
            .into_iter()
            .zip(item_lists)
            .map(|(category, items)| CatalogTab {
                icon: icon_or(category.icon.as_deref(), FALLBACK_CATEGORY_ICON),
                id: category.id,
                title: category.name,
                attribute_keys: category.attribute_keys,
                visible: category.visible,
                data: items
                    .into_iter()
                    .map(|item| CatalogEntry {
                        icon: icon_or(item.icon_name.as_deref(), FALLBACK_ITEM_ICON),
                        id: item.id,
                        kind: item.title,
                        visible: item.visible,
                        attributes: item.attributes,
                    })
                    .collect(),
            })
            .collect();

        Ok(ServicesPayload {
            heading: heading.to_string(),
            tabs,
        })
    }
}
