//! Admin notification model.

use serde::{Deserialize, Serialize};
use deal4bank_core::notification::NotificationKind;
use deal4bank_core::types::{DocId, Timestamp};

/// A document in the `notifications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DocId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_id: Option<DocId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<DocId>,
    #[serde(default)]
    pub read: bool,
    pub created_at: Timestamp,
}

/// Query parameters for listing notifications.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationListParams {
    pub limit: Option<i64>,
    pub unread: Option<bool>,
}
