//! Mailbox email model and admin DTOs.

use serde::{Deserialize, Serialize};
use deal4bank_core::mailbox::EmailStatus;
use deal4bank_core::types::{DocId, Timestamp};

/// A document in the `emails` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: DocId,
    /// Provider-side message id, when known.
    #[serde(default)]
    pub email_id: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub status: EmailStatus,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub starred: bool,
    /// Attachment metadata as delivered by the provider.
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    pub created_at: Timestamp,
}

/// An inbound message as received from the provider webhook.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    pub email_id: Option<String>,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<serde_json::Value>,
}

/// An outbound message that the provider accepted.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub email_id: Option<String>,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// DTO for moving an email to another folder.
#[derive(Debug, Deserialize)]
pub struct UpdateEmailStatus {
    pub status: String,
}

/// DTO for starring or unstarring. Without `starred` the flag is toggled.
#[derive(Debug, Default, Deserialize)]
pub struct SetStarred {
    pub starred: Option<bool>,
}

/// Query parameters for listing a folder.
#[derive(Debug, Default, Deserialize)]
pub struct EmailListParams {
    pub status: Option<String>,
    pub starred: Option<bool>,
    pub limit: Option<i64>,
}
