//! Lead inquiry model and admin DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use deal4bank_core::inquiry::InquiryStatus;
use deal4bank_core::types::{DocId, Timestamp};

/// A document in the `inquiries` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: DocId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// The requested service, copied from the form's `serviceType`.
    pub service: String,
    pub status: InquiryStatus,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// DTO for changing an inquiry's status.
#[derive(Debug, Deserialize)]
pub struct UpdateInquiryStatus {
    pub status: String,
}

/// DTO for setting (or clearing, with `null`) the follow-up date.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFollowUp {
    pub follow_up_date: Option<NaiveDate>,
}

/// Query parameters for listing inquiries.
#[derive(Debug, Default, Deserialize)]
pub struct InquiryListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
}
