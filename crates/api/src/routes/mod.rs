pub mod catalog;
pub mod dashboard;
pub mod emails;
pub mod health;
pub mod inquiries;
pub mod notifications;
pub mod settings;
pub mod site;
pub mod webhooks;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /services                                        aggregated catalog (public)
/// /site-data                                       settings + catalog, cached (public)
/// /settings                                        company profile (public)
/// /landing                                         rendered landing view (public)
/// /inquiries                                       lead intake (POST, public)
/// /webhooks/resend                                 email provider events (POST)
///
/// /admin/ws                                        WebSocket alerts
///
/// /admin/catalog/categories                        list, save
/// /admin/catalog/categories/{id}                   delete
/// /admin/catalog/categories/{id}/keys              add key
/// /admin/catalog/categories/{id}/keys/{index}      rename, remove key
/// /admin/catalog/categories/{id}/items             list, save
/// /admin/catalog/categories/{id}/items/{item_id}   delete
/// /admin/catalog/categories/{id}/items/{item_id}/editor      editor view
/// /admin/catalog/categories/{id}/items/{item_id}/attributes  set values
///
/// /admin/inquiries                                 list
/// /admin/inquiries/{id}                            get, delete
/// /admin/inquiries/{id}/status                     update status (PATCH)
/// /admin/inquiries/{id}/follow-up                  set follow-up (PATCH)
///
/// /admin/emails                                    list folder
/// /admin/emails/send                               compose (POST)
/// /admin/emails/refine                             refine tone (POST)
/// /admin/emails/{id}                               get
/// /admin/emails/{id}/read                          mark read (PATCH)
/// /admin/emails/{id}/star                          toggle star (PATCH)
/// /admin/emails/{id}/status                        move folder (PATCH)
/// /admin/emails/{id}/reply                         reply (POST)
/// /admin/emails/{id}/summarize                     summarize (POST)
///
/// /admin/notifications                             list recent
/// /admin/notifications/unread-count                unread count
/// /admin/notifications/read-all                    mark all read (POST)
/// /admin/notifications/{id}/read                   mark read (PATCH)
///
/// /admin/settings/company                          get, replace
/// /admin/settings/global                           get, replace
///
/// /admin/dashboard                                 summary
/// /admin/cache/invalidate                          drop site-data cache (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public landing-page reads and lead intake.
        .merge(site::router())
        .nest("/inquiries", inquiries::public_router())
        .nest("/webhooks", webhooks::router())
        // Back office.
        .nest("/admin", admin_routes())
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/catalog", catalog::router())
        .nest("/inquiries", inquiries::admin_router())
        .nest("/emails", emails::router())
        .nest("/notifications", notifications::router())
        .nest("/settings", settings::router())
        .merge(dashboard::router())
}
