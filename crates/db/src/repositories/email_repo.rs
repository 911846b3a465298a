//! Repository for the `emails` collection.

use serde_json::json;
use deal4bank_core::mailbox::EmailStatus;
use deal4bank_core::notification::{email_message, NotificationKind};

use super::{decode_all, decode_opt};
use crate::collections::{EMAILS, NOTIFICATIONS};
use crate::models::email::{Email, InboundEmail, SentEmail};
use crate::models::notification::Notification;
use crate::store::{body, DocumentStore, ListQuery, NewDocument, StoreError};

/// Provides CRUD operations for mailbox emails.
pub struct EmailRepo;

impl EmailRepo {
    /// Record an inbound message in the inbox together with its
    /// `NEW_EMAIL` notification, in one atomic batch.
    pub async fn record_inbound_with_notification(
        store: &dyn DocumentStore,
        input: &InboundEmail,
    ) -> Result<(Email, Notification), StoreError> {
        let email = NewDocument::new(
            EMAILS,
            body(json!({
                "emailId": input.email_id,
                "from": input.from,
                "to": input.to,
                "subject": input.subject,
                "body": input.body,
                "attachments": input.attachments,
                "status": EmailStatus::Inbox,
                "read": false,
                "starred": false,
            })),
        );
        let kind = NotificationKind::NewEmail;
        let notification = NewDocument::new(
            NOTIFICATIONS,
            body(json!({
                "type": kind,
                "title": kind.title(),
                "message": email_message(&input.from, &input.subject),
                "emailId": email.id,
                "read": false,
            })),
        );

        let docs = store.create_batch(vec![email, notification]).await?;
        match docs.as_slice() {
            [email, notification] => Ok((email.decode()?, notification.decode()?)),
            _ => Err(StoreError::Unavailable(format!(
                "batch returned {} documents, expected 2",
                docs.len()
            ))),
        }
    }

    /// Record a message the provider accepted in the `sent` folder.
    pub async fn create_sent(
        store: &dyn DocumentStore,
        input: &SentEmail,
    ) -> Result<Email, StoreError> {
        let doc = store
            .create(
                EMAILS,
                body(json!({
                    "emailId": input.email_id,
                    "from": input.from,
                    "to": input.to,
                    "subject": input.subject,
                    "body": input.body,
                    "attachments": [],
                    "status": EmailStatus::Sent,
                    "read": true,
                    "starred": false,
                })),
            )
            .await?;
        doc.decode()
    }

    /// List a folder newest first, optionally only starred (or unstarred) mail.
    pub async fn list(
        store: &dyn DocumentStore,
        status: Option<EmailStatus>,
        starred: Option<bool>,
        limit: Option<i64>,
    ) -> Result<Vec<Email>, StoreError> {
        let mut query = ListQuery::new().newest_first();
        if let Some(status) = status {
            query = query.filter("status", status.as_str());
        }
        if let Some(starred) = starred {
            query = query.filter("starred", starred);
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        decode_all(store.list(EMAILS, &query).await?)
    }

    pub async fn find(store: &dyn DocumentStore, id: &str) -> Result<Option<Email>, StoreError> {
        decode_opt(store.get(EMAILS, id).await?)
    }

    /// Mark an email read. There is no way back to unread.
    pub async fn mark_read(store: &dyn DocumentStore, id: &str) -> Result<Option<Email>, StoreError> {
        let patch = body(json!({ "read": true }));
        decode_opt(store.update(EMAILS, id, patch).await?)
    }

    pub async fn set_starred(
        store: &dyn DocumentStore,
        id: &str,
        starred: bool,
    ) -> Result<Option<Email>, StoreError> {
        let patch = body(json!({ "starred": starred }));
        decode_opt(store.update(EMAILS, id, patch).await?)
    }

    /// Write a new folder. Transition rules are checked by the caller.
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        status: EmailStatus,
    ) -> Result<Option<Email>, StoreError> {
        let patch = body(json!({ "status": status }));
        decode_opt(store.update(EMAILS, id, patch).await?)
    }

    pub async fn count_unread_inbox(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        let query = ListQuery::new()
            .filter("status", EmailStatus::Inbox.as_str())
            .filter("read", false);
        store.count(EMAILS, &query).await
    }
}
