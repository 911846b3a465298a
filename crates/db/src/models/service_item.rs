//! Catalog item (a card under a category) and its save DTO.

use serde::{Deserialize, Serialize};
use deal4bank_core::catalog::Attribute;
use deal4bank_core::types::DocId;

/// A document in a category's `items` sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: DocId,
    #[serde(default)]
    pub tab_id: DocId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "super::default_true")]
    pub visible: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// DTO for the editor's "save item" action, scoped to the active category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveServiceItem {
    pub id: Option<DocId>,
    #[serde(default)]
    pub title: String,
    pub icon_name: Option<String>,
    pub attributes: Option<Vec<Attribute>>,
    pub order: Option<i64>,
    pub visible: Option<bool>,
}
