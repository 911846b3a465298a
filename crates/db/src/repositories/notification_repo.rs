//! Repository for the `notifications` collection.

use futures::future::try_join_all;
use serde_json::json;

use super::{decode_all, decode_opt};
use crate::collections::NOTIFICATIONS;
use crate::models::notification::Notification;
use crate::store::{body, DocumentStore, ListQuery, StoreError};

/// Default page size for the notification bell.
pub const DEFAULT_LIMIT: i64 = 20;

/// Provides read-state operations for admin notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// List the most recent notifications, optionally only unread ones.
    pub async fn list_recent(
        store: &dyn DocumentStore,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut query = ListQuery::new().newest_first().limit(limit);
        if unread_only {
            query = query.filter("read", false);
        }
        decode_all(store.list(NOTIFICATIONS, &query).await?)
    }

    pub async fn find(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Notification>, StoreError> {
        decode_opt(store.get(NOTIFICATIONS, id).await?)
    }

    pub async fn mark_read(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Notification>, StoreError> {
        let patch = body(json!({ "read": true }));
        decode_opt(store.update(NOTIFICATIONS, id, patch).await?)
    }

    /// Mark every unread notification read. Returns how many changed.
    pub async fn mark_all_read(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        let unread = store
            .list(NOTIFICATIONS, &ListQuery::new().filter("read", false))
            .await?;
        let updated = try_join_all(unread.iter().map(|doc| {
            store.update(NOTIFICATIONS, &doc.id, body(json!({ "read": true })))
        }))
        .await?;
        Ok(updated.into_iter().flatten().count() as u64)
    }

    pub async fn unread_count(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        store
            .count(NOTIFICATIONS, &ListQuery::new().filter("read", false))
            .await
    }
}
