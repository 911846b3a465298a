//! Service catalog schema: categories, attribute keys and item attributes.
//!
//! A category declares an ordered list of free-text attribute keys
//! (e.g. "Interest", "Tenure"). Every item in the category carries a list
//! of `(label, value)` pairs that is expected to hold one entry per key,
//! matched by exact string equality on the label. Nothing enforces that
//! shape in storage, so the functions here are tolerant of missing,
//! duplicate and orphaned labels.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::validation::is_blank;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Icons offered for categories by the admin editor.
pub const CATEGORY_ICONS: &[&str] = &["CreditCard", "Shield", "Briefcase", "Home", "Landmark"];

/// Icons offered for catalog items by the admin editor.
pub const ITEM_ICONS: &[&str] = &["User", "Home", "Building", "Car", "Landmark", "CreditCard"];

/// Icon assigned to a new category when none is given.
pub const DEFAULT_CATEGORY_ICON: &str = "Landmark";

/// Icon assigned to a new item when none is given.
pub const DEFAULT_ITEM_ICON: &str = "User";

/// Icon the read API substitutes for a category with no icon.
pub const FALLBACK_CATEGORY_ICON: &str = "Landmark";

/// Icon the read API substitutes for an item with no icon.
pub const FALLBACK_ITEM_ICON: &str = "Shield";

/// Maximum length of an attribute key.
pub const MAX_ATTRIBUTE_KEY_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One `(label, value)` pair on a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Attribute {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Aggregated catalog served to the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ServicesPayload {
    pub heading: String,
    pub tabs: Vec<CatalogTab>,
}

/// One category in the aggregated catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogTab {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub attribute_keys: Vec<String>,
    pub visible: bool,
    pub data: Vec<CatalogEntry>,
}

/// One item in the aggregated catalog. `kind` is the item title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub visible: bool,
    pub attributes: Vec<Attribute>,
}

/// One editable input in the item editor, bound to a category key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorField {
    pub key: String,
    pub value: String,
    /// Whether the item already carries an attribute with this label.
    pub present: bool,
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Validate a category icon name against [`CATEGORY_ICONS`].
pub fn validate_category_icon(icon: &str) -> Result<(), String> {
    validate_icon(icon, CATEGORY_ICONS)
}

/// Validate an item icon name against [`ITEM_ICONS`].
pub fn validate_item_icon(icon: &str) -> Result<(), String> {
    validate_icon(icon, ITEM_ICONS)
}

fn validate_icon(icon: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&icon) {
        Ok(())
    } else {
        Err(format!(
            "Unknown icon '{icon}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

/// Substitute `fallback` when `icon` is missing or blank.
pub fn icon_or(icon: Option<&str>, fallback: &str) -> String {
    match icon {
        Some(i) if !is_blank(i) => i.to_string(),
        _ => fallback.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// Find the first attribute whose label equals `key` exactly.
pub fn find_attribute<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.label == key)
}

/// Build the editor inputs for an item: one per category key, in key order.
///
/// Attributes whose label is not a current key are not represented; see
/// [`orphaned_attributes`].
pub fn editor_fields(keys: &[String], attributes: &[Attribute]) -> Vec<EditorField> {
    keys.iter()
        .map(|key| match find_attribute(attributes, key) {
            Some(attr) => EditorField {
                key: key.clone(),
                value: attr.value.clone(),
                present: true,
            },
            None => EditorField {
                key: key.clone(),
                value: String::new(),
                present: false,
            },
        })
        .collect()
}

/// Attributes whose label matches none of the category keys.
pub fn orphaned_attributes(keys: &[String], attributes: &[Attribute]) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|a| !keys.iter().any(|k| *k == a.label))
        .cloned()
        .collect()
}

/// Set the value bound to `label`, creating the attribute on first edit.
///
/// Only the first entry with a matching label is updated.
pub fn set_attribute_value(attributes: &mut Vec<Attribute>, label: &str, value: &str) {
    match attributes.iter_mut().find(|a| a.label == label) {
        Some(attr) => attr.value = value.to_string(),
        None => attributes.push(Attribute::new(label, value)),
    }
}

/// Rewrite every attribute labelled `from` to `to`. Returns `true` if any changed.
pub fn relabel_attributes(attributes: &mut [Attribute], from: &str, to: &str) -> bool {
    let mut changed = false;
    for attr in attributes.iter_mut().filter(|a| a.label == from) {
        attr.label = to.to_string();
        changed = true;
    }
    changed
}

/// Drop every attribute labelled `label`. Returns `true` if any were removed.
pub fn prune_attributes(attributes: &mut Vec<Attribute>, label: &str) -> bool {
    let before = attributes.len();
    attributes.retain(|a| a.label != label);
    attributes.len() != before
}

// ---------------------------------------------------------------------------
// Attribute keys
// ---------------------------------------------------------------------------

/// Validate a single attribute key: non-blank and within the length limit.
pub fn validate_attribute_key(key: &str) -> Result<(), CoreError> {
    if is_blank(key) {
        return Err(CoreError::Validation(
            "Attribute key cannot be empty".to_string(),
        ));
    }
    if key.chars().count() > MAX_ATTRIBUTE_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Attribute key exceeds maximum length of {MAX_ATTRIBUTE_KEY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Append a key. The key is trimmed; blank and duplicate keys are rejected.
pub fn add_attribute_key(keys: &mut Vec<String>, key: &str) -> Result<(), CoreError> {
    let key = key.trim();
    validate_attribute_key(key)?;
    if keys.iter().any(|k| k == key) {
        return Err(CoreError::Conflict(format!(
            "Attribute key '{key}' already exists"
        )));
    }
    keys.push(key.to_string());
    Ok(())
}

/// Validate a whole key list as saved with a category. Keys are trimmed;
/// a blank, overlong or repeated key rejects the list.
pub fn normalize_attribute_keys(keys: &[String]) -> Result<Vec<String>, CoreError> {
    let mut normalized: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let key = key.trim();
        validate_attribute_key(key)?;
        if normalized.iter().any(|k| k == key) {
            return Err(CoreError::Validation(format!(
                "Attribute key '{key}' is listed more than once"
            )));
        }
        normalized.push(key.to_string());
    }
    Ok(normalized)
}

/// Rename the key at `index`, returning the previous name.
///
/// Item attributes are not touched; callers decide whether to cascade.
pub fn rename_attribute_key(
    keys: &mut [String],
    index: usize,
    new_key: &str,
) -> Result<String, CoreError> {
    let new_key = new_key.trim();
    validate_attribute_key(new_key)?;
    let len = keys.len();
    if index >= len {
        return Err(key_index_error(index, len));
    }
    if keys
        .iter()
        .enumerate()
        .any(|(i, k)| i != index && k == new_key)
    {
        return Err(CoreError::Conflict(format!(
            "Attribute key '{new_key}' already exists"
        )));
    }
    Ok(std::mem::replace(&mut keys[index], new_key.to_string()))
}

/// Remove the key at `index`, returning it.
pub fn remove_attribute_key(keys: &mut Vec<String>, index: usize) -> Result<String, CoreError> {
    if index >= keys.len() {
        return Err(key_index_error(index, keys.len()));
    }
    Ok(keys.remove(index))
}

fn key_index_error(index: usize, len: usize) -> CoreError {
    CoreError::Validation(format!(
        "Attribute key index {index} is out of range (category has {len} keys)"
    ))
}
