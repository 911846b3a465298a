//! Shared response envelope types for API handlers.
//!
//! Admin responses use a `{ "data": ... }` envelope. Public endpoints
//! return the payload shapes the landing page already consumes.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of an editor action that also rewrote item attributes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResponse<T: Serialize> {
    pub data: T,
    /// Number of items whose attributes were changed.
    pub items_updated: usize,
}
