//! Alert-to-WebSocket fan-out.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::broadcast;
use deal4bank_events::AdminAlert;

use crate::ws::WsManager;

/// Forwards admin alerts to every connected admin session.
pub struct AlertRouter {
    ws_manager: Arc<WsManager>,
}

/// Build the WebSocket frame for an alert.
pub fn alert_message(alert: &AdminAlert) -> Message {
    let payload = json!({
        "type": "notification",
        "notificationId": alert.notification_id,
        "kind": alert.kind,
        "title": alert.title,
        "message": alert.message,
        "createdAt": alert.created_at,
    });
    Message::Text(payload.to_string().into())
}

impl AlertRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the routing loop until the alert bus is closed.
    pub async fn run(self, mut receiver: broadcast::Receiver<AdminAlert>) {
        loop {
            match receiver.recv().await {
                Ok(alert) => {
                    let delivered = self.ws_manager.broadcast(alert_message(&alert)).await;
                    tracing::debug!(
                        notification_id = %alert.notification_id,
                        delivered,
                        "Alert pushed to admin sessions"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Alert router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Alert bus closed, alert router shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use deal4bank_core::notification::NotificationKind;
    use deal4bank_events::AlertBus;

    fn alert() -> AdminAlert {
        AdminAlert {
            notification_id: "n1".into(),
            kind: NotificationKind::NewInquiry,
            title: "New Service Inquiry".into(),
            message: "Asha applied for Home Loan".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn alert_frame_is_tagged_json() {
        let Message::Text(text) = alert_message(&alert()) else {
            panic!("expected a text frame");
        };
        let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(value["type"], "notification");
        assert_eq!(value["kind"], "NEW_INQUIRY");
        assert_eq!(value["notificationId"], "n1");
    }

    #[tokio::test]
    async fn alerts_reach_connected_sessions() {
        let ws_manager = Arc::new(WsManager::new());
        let mut rx = ws_manager.add("c1".into()).await;
        let bus = AlertBus::default();
        let handle = tokio::spawn(AlertRouter::new(Arc::clone(&ws_manager)).run(bus.subscribe()));

        bus.publish(alert());
        let frame = rx.recv().await.unwrap();
        assert!(matches!(frame, Message::Text(_)));

        drop(bus);
        handle.await.unwrap();
    }
}
