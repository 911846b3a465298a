//! Admin notification kinds and message text.

use serde::{Deserialize, Serialize};

/// What caused a notification to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewInquiry,
    NewEmail,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewInquiry => "NEW_INQUIRY",
            Self::NewEmail => "NEW_EMAIL",
        }
    }

    /// Title shown in the admin toast.
    pub fn title(self) -> &'static str {
        match self {
            Self::NewInquiry => "New Service Inquiry",
            Self::NewEmail => "New Email Received",
        }
    }
}

/// Title used when a notification document carries none.
pub const DEFAULT_TITLE: &str = "New Notification";

/// Notifications older than this are not pushed to live admin sessions.
pub const RECENT_WINDOW_SECS: i64 = 60;

pub fn inquiry_message(full_name: &str, service: &str) -> String {
    format!("{full_name} applied for {service}")
}

pub fn email_message(from: &str, subject: &str) -> String {
    format!("From: {from}\nSubject: {subject}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_in_screaming_case() {
        assert_eq!(
            serde_json::to_value(NotificationKind::NewInquiry).unwrap(),
            serde_json::json!("NEW_INQUIRY")
        );
        assert_eq!(NotificationKind::NewEmail.as_str(), "NEW_EMAIL");
    }

    #[test]
    fn message_text() {
        assert_eq!(inquiry_message("Asha", "Home Loan"), "Asha applied for Home Loan");
        assert_eq!(
            email_message("a@b.com", "Hello"),
            "From: a@b.com\nSubject: Hello"
        );
    }
}
