//! Change-feed listener that raises admin alerts for new notifications.
//!
//! [`NotificationListener`] subscribes to the document store's change feed
//! and publishes an [`AdminAlert`] for each notification document that is
//! added while it runs. Notifications older than the recent window are
//! ignored so a replayed or backfilled write does not page anyone.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use deal4bank_core::notification::RECENT_WINDOW_SECS;
use deal4bank_db::collections::NOTIFICATIONS;
use deal4bank_db::models::notification::Notification;
use deal4bank_db::store::{ChangeKind, DocumentChange};

use crate::bus::{AdminAlert, AlertBus};

/// Background service that converts notification writes into alerts.
pub struct NotificationListener {
    bus: Arc<AlertBus>,
}

impl NotificationListener {
    pub fn new(bus: Arc<AlertBus>) -> Self {
        Self { bus }
    }

    /// Run until cancelled or until the change feed closes.
    pub async fn run(
        self,
        mut changes: broadcast::Receiver<DocumentChange>,
        cancel: CancellationToken,
    ) {
        tracing::info!("Notification listener started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Notification listener cancelled");
                    break;
                }
                received = changes.recv() => match received {
                    Ok(change) => {
                        if let Some(alert) = alert_for(&change) {
                            tracing::debug!(
                                notification_id = %alert.notification_id,
                                kind = alert.kind.as_str(),
                                "Publishing admin alert"
                            );
                            self.bus.publish(alert);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Notification listener lagged, some alerts were dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Change feed closed, notification listener shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// The alert for a change, if it is a recently added notification.
fn alert_for(change: &DocumentChange) -> Option<AdminAlert> {
    if change.kind != ChangeKind::Added || change.collection != NOTIFICATIONS {
        return None;
    }
    let document = change.document.as_ref()?;
    let notification: Notification = match document.decode() {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed notification");
            return None;
        }
    };

    let cutoff = Utc::now() - Duration::seconds(RECENT_WINDOW_SECS);
    if notification.created_at < cutoff {
        return None;
    }
    Some(AdminAlert::from(notification))
}
