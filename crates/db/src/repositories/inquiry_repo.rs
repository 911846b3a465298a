//! Repository for the `inquiries` collection.

use chrono::NaiveDate;
use serde_json::json;
use deal4bank_core::inquiry::{InquirySubmission, InquiryStatus};
use deal4bank_core::notification::{inquiry_message, NotificationKind};

use super::{decode_all, decode_opt};
use crate::collections::{INQUIRIES, NOTIFICATIONS};
use crate::models::inquiry::Inquiry;
use crate::models::notification::Notification;
use crate::store::{body, DocumentStore, ListQuery, NewDocument, StoreError};

/// Provides CRUD operations for lead inquiries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Record a validated submission as a pending inquiry together with its
    /// `NEW_INQUIRY` notification, in one atomic batch.
    pub async fn create_with_notification(
        store: &dyn DocumentStore,
        input: &InquirySubmission,
    ) -> Result<(Inquiry, Notification), StoreError> {
        let inquiry = NewDocument::new(
            INQUIRIES,
            body(json!({
                "fullName": input.full_name,
                "email": input.email,
                "phone": input.phone,
                "city": input.city,
                "state": input.state,
                "pincode": input.pincode,
                "service": input.service_type,
                "status": InquiryStatus::Pending,
            })),
        );
        let kind = NotificationKind::NewInquiry;
        let notification = NewDocument::new(
            NOTIFICATIONS,
            body(json!({
                "type": kind,
                "title": kind.title(),
                "message": inquiry_message(&input.full_name, &input.service_type),
                "inquiryId": inquiry.id,
                "read": false,
            })),
        );

        let docs = store.create_batch(vec![inquiry, notification]).await?;
        match docs.as_slice() {
            [inquiry, notification] => Ok((inquiry.decode()?, notification.decode()?)),
            _ => Err(StoreError::Unavailable(format!(
                "batch returned {} documents, expected 2",
                docs.len()
            ))),
        }
    }

    /// List inquiries newest first, optionally restricted to one status.
    pub async fn list(
        store: &dyn DocumentStore,
        status: Option<InquiryStatus>,
        limit: Option<i64>,
    ) -> Result<Vec<Inquiry>, StoreError> {
        let mut query = ListQuery::new().newest_first();
        if let Some(status) = status {
            query = query.filter("status", status.as_str());
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        decode_all(store.list(INQUIRIES, &query).await?)
    }

    pub async fn find(store: &dyn DocumentStore, id: &str) -> Result<Option<Inquiry>, StoreError> {
        decode_opt(store.get(INQUIRIES, id).await?)
    }

    pub async fn update_status(
        store: &dyn DocumentStore,
        id: &str,
        status: InquiryStatus,
    ) -> Result<Option<Inquiry>, StoreError> {
        let patch = body(json!({ "status": status }));
        decode_opt(store.update(INQUIRIES, id, patch).await?)
    }

    /// Set the follow-up date, or clear it with `None`.
    pub async fn set_follow_up(
        store: &dyn DocumentStore,
        id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Inquiry>, StoreError> {
        let patch = body(json!({ "followUpDate": date }));
        decode_opt(store.update(INQUIRIES, id, patch).await?)
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete(INQUIRIES, id).await
    }

    pub async fn count_by_status(
        store: &dyn DocumentStore,
        status: InquiryStatus,
    ) -> Result<u64, StoreError> {
        let query = ListQuery::new().filter("status", status.as_str());
        store.count(INQUIRIES, &query).await
    }
}
