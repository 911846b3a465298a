//! In-process alert bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`AlertBus`] is shared via `Arc<AlertBus>`; the WebSocket router
//! subscribes to it and pushes every alert to connected admin sessions.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use deal4bank_core::notification::NotificationKind;
use deal4bank_core::types::{DocId, Timestamp};
use deal4bank_db::models::notification::Notification;

// ---------------------------------------------------------------------------
// AdminAlert
// ---------------------------------------------------------------------------

/// A live alert for admin sessions, derived from a notification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAlert {
    pub notification_id: DocId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: Timestamp,
}

impl From<Notification> for AdminAlert {
    fn from(n: Notification) -> Self {
        let title = if n.title.trim().is_empty() {
            deal4bank_core::notification::DEFAULT_TITLE.to_string()
        } else {
            n.title
        };
        Self {
            notification_id: n.id,
            kind: n.kind,
            title,
            message: n.message,
            created_at: n.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// AlertBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out of [`AdminAlert`]s.
///
/// When the buffer is full the oldest alerts are dropped and slow
/// receivers observe `RecvError::Lagged`.
pub struct AlertBus {
    sender: broadcast::Sender<AdminAlert>,
}

impl AlertBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an alert to all current subscribers.
    pub fn publish(&self, alert: AdminAlert) {
        // A send error only means nobody is listening.
        let _ = self.sender.send(alert);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminAlert> {
        self.sender.subscribe()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
