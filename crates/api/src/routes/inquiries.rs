//! Route definitions for lead inquiries.
//!
//! ```text
//! /api/inquiries                      submit (POST, public)
//!
//! /api/admin/inquiries                list (GET)
//! /api/admin/inquiries/{id}           get (GET), delete (DELETE)
//! /api/admin/inquiries/{id}/status    update status (PATCH)
//! /api/admin/inquiries/{id}/follow-up set follow-up date (PATCH)
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// Public intake route.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(inquiries::submit_inquiry))
}

/// Admin inquiry management.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::list_inquiries))
        .route(
            "/{id}",
            get(inquiries::get_inquiry).delete(inquiries::delete_inquiry),
        )
        .route("/{id}/status", patch(inquiries::update_status))
        .route("/{id}/follow-up", patch(inquiries::set_follow_up))
}
