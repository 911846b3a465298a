//! Catalog category (a landing-page tab) and its save DTO.

use serde::{Deserialize, Serialize};
use deal4bank_core::types::DocId;

/// A document in the `services_tabs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DocId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "super::default_true")]
    pub visible: bool,
    /// Ordered attribute keys shared by every item in the category.
    #[serde(default)]
    pub attribute_keys: Vec<String>,
}

/// DTO for the editor's "save category" action.
///
/// With `id` set this is a partial update of the provided fields;
/// without it a new category is created.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCategory {
    pub id: Option<DocId>,
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub attribute_keys: Option<Vec<String>>,
    pub order: Option<i64>,
    pub visible: Option<bool>,
}
