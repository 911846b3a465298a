//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?tab=` selection for the landing view.
#[derive(Debug, Default, Deserialize)]
pub struct TabParams {
    pub tab: Option<String>,
}

/// `?cascade=true` on attribute key renames rewrites matching item labels.
#[derive(Debug, Default, Deserialize)]
pub struct CascadeParams {
    #[serde(default)]
    pub cascade: bool,
}

/// `?prune=true` on attribute key removal deletes matching item values.
#[derive(Debug, Default, Deserialize)]
pub struct PruneParams {
    #[serde(default)]
    pub prune: bool,
}
