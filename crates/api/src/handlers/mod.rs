//! Request handlers.
//!
//! Each submodule provides the async handler functions for one area of the
//! API. Handlers delegate to the repositories in `deal4bank_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod catalog;
pub mod dashboard;
pub mod emails;
pub mod inquiries;
pub mod notifications;
pub mod settings;
pub mod site;
pub mod webhooks;

use deal4bank_core::site::SITE_DATA_CACHE_KEY;

use crate::state::AppState;

/// Drop the cached site-data payload after a catalog or company change.
pub(crate) async fn invalidate_site_data(state: &AppState) {
    if state.site_cache.invalidate(SITE_DATA_CACHE_KEY).await {
        tracing::debug!(key = SITE_DATA_CACHE_KEY, "Site data cache invalidated");
    }
}
