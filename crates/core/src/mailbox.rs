//! Inbox folders, status transitions and outbound message schema.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::validate_fields;

/// Tone descriptor sent with every "refine tone" request.
pub const REFINE_TONE: &str = "professional, empathetic and clear";

/// Recipient recorded for inbound mail that arrives without a `to` list.
pub const UNKNOWN_RECIPIENT: &str = "unknown@deal4bank.com";

/// Body recorded for inbound mail that has neither text nor HTML.
pub const EMPTY_BODY: &str = "(No content)";

/// Folder an email lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Inbox,
    Sent,
    Trash,
    Spam,
}

impl EmailStatus {
    pub const ALL: [EmailStatus; 4] = [Self::Inbox, Self::Sent, Self::Trash, Self::Spam];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Trash => "trash",
            Self::Spam => "spam",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid email status '{value}'. Must be one of: inbox, sent, trash, spam"
                ))
            })
    }

    /// Whether an email in `self` may be moved to `next`.
    ///
    /// Transitions only ever move toward trash; nothing comes back out.
    pub fn can_transition_to(self, next: EmailStatus) -> bool {
        matches!(
            (self, next),
            (Self::Inbox, Self::Trash)
                | (Self::Inbox, Self::Spam)
                | (Self::Sent, Self::Trash)
                | (Self::Spam, Self::Trash)
        )
    }
}

/// Check a folder move, returning a conflict for disallowed transitions.
pub fn validate_transition(from: EmailStatus, to: EmailStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move an email from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Subject line for a reply.
pub fn reply_subject(subject: &str) -> String {
    format!("Re: {subject}")
}

const COMPOSE_FIELDS: &[&str] = &["to", "subject", "body"];

/// Outbound message composed in the admin inbox.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ComposeEmail {
    #[validate(
        length(min = 1, message = "Recipient is required"),
        email(message = "Please enter a valid email")
    )]
    pub to: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message body is required"))]
    pub body: String,
}

impl ComposeEmail {
    pub fn check(&self) -> Result<(), CoreError> {
        validate_fields(self, COMPOSE_FIELDS)
    }
}
