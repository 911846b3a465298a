use std::collections::HashMap;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::Message;
use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use deal4bank_core::types::Timestamp;

/// Outbound half of an admin session's message queue.
pub type Outbox = mpsc::UnboundedSender<Message>;

/// One open admin console tab listening for live alerts.
struct AdminSession {
    outbox: Outbox,
    opened_at: Timestamp,
    /// Last time the browser answered a ping (or connected).
    last_seen: Timestamp,
}

/// Registry of open admin sessions.
///
/// Shared as `Arc<WsManager>`; the alert router broadcasts through it and
/// the heartbeat task keeps it free of dead sessions.
pub struct WsManager {
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session and hand back the queue the socket task drains.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (outbox, inbox) = mpsc::unbounded_channel();
        let now = Utc::now();
        self.sessions.write().await.insert(
            conn_id,
            AdminSession {
                outbox,
                opened_at: now,
                last_seen: now,
            },
        );
        inbox
    }

    pub async fn remove(&self, conn_id: &str) {
        self.sessions.write().await.remove(conn_id);
    }

    /// Mark a session as alive after a pong.
    pub async fn record_pong(&self, conn_id: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(conn_id) {
            session.last_seen = Utc::now();
        }
    }

    /// Queue `message` for every session. Returns the number of sessions
    /// that took it; sessions whose socket task has gone are dropped.
    pub async fn broadcast(&self, message: Message) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.outbox.send(message.clone()).is_ok());
        sessions.len()
    }

    pub async fn connection_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Ask every session to close and forget them all.
    pub async fn shutdown_all(&self) {
        let mut sessions = self.sessions.write().await;
        for session in sessions.values() {
            let _ = session.outbox.send(Message::Close(None));
        }
        tracing::info!(count = sessions.len(), "Closed all admin sessions");
        sessions.clear();
    }

    pub async fn ping_all(&self) {
        let sessions = self.sessions.read().await;
        for session in sessions.values() {
            let _ = session.outbox.send(Message::Ping(Bytes::new()));
        }
    }

    /// Close and drop sessions that have not answered within `max_silence`.
    /// Returns the ids that were dropped.
    pub async fn evict_silent(&self, max_silence: Duration) -> Vec<String> {
        let Ok(max_silence) = chrono::Duration::from_std(max_silence) else {
            return Vec::new();
        };
        let cutoff = Utc::now() - max_silence;
        let mut sessions = self.sessions.write().await;
        let silent: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.last_seen < cutoff)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &silent {
            if let Some(session) = sessions.remove(id) {
                let _ = session.outbox.send(Message::Close(None));
            }
        }
        silent
    }

    /// When the longest-lived open session started.
    pub async fn oldest_connection(&self) -> Option<Timestamp> {
        self.sessions
            .read()
            .await
            .values()
            .map(|s| s.opened_at)
            .min()
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
