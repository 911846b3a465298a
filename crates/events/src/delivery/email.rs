//! Transactional email delivery via the Resend HTTP API.
//!
//! [`ResendDelivery`] posts plain-text messages to `{api_url}/emails`.
//! Sending needs `RESEND_API_KEY`; without it every send fails with
//! [`EmailError::NotConfigured`] before any request is made.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// A required setting is missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The HTTP request failed (network, DNS, timeout, etc.).
    #[error("Email provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the message.
    #[error("Email provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default sender when `RESEND_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

/// Default provider base URL.
const DEFAULT_API_URL: &str = "https://api.resend.com";

/// Default address recorded as the sender of outbound mail.
const DEFAULT_ADMIN_MAILBOX: &str = "admin@deal4bank.com";

/// Configuration for the email provider.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Provider API key. Sending is refused without it.
    pub api_key: Option<String>,
    /// RFC 5322 "From" address given to the provider.
    pub from_address: String,
    /// Provider base URL.
    pub api_url: String,
    /// Mailbox recorded as the sender on locally stored sent mail.
    pub admin_mailbox: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable         | Required        | Default                  |
    /// |------------------|-----------------|--------------------------|
    /// | `RESEND_API_KEY` | to send mail    | none                     |
    /// | `RESEND_FROM`    | no              | `onboarding@resend.dev`  |
    /// | `RESEND_API_URL` | no              | `https://api.resend.com` |
    /// | `ADMIN_MAILBOX`  | no              | `admin@deal4bank.com`    |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RESEND_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            from_address: std::env::var("RESEND_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            admin_mailbox: std::env::var("ADMIN_MAILBOX")
                .unwrap_or_else(|_| DEFAULT_ADMIN_MAILBOX.to_string()),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            admin_mailbox: DEFAULT_ADMIN_MAILBOX.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmailSender
// ---------------------------------------------------------------------------

/// A plain-text message to a single recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Sends outbound mail. Returns the provider's message id.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError>;
}

// ---------------------------------------------------------------------------
// ResendDelivery
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// [`EmailSender`] backed by the Resend API.
pub struct ResendDelivery {
    client: reqwest::Client,
    config: EmailConfig,
}

impl ResendDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl EmailSender for ResendDelivery {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EmailError::NotConfigured("RESEND_API_KEY"))?;

        let url = format!("{}/emails", self.config.api_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&SendRequest {
                from: &self.config.from_address,
                to: [email.to.as_str()],
                subject: &email.subject,
                text: &email.text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            tracing::error!(status = status.as_u16(), %message, "Email provider rejected message");
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response.json().await?;
        tracing::info!(to = %email.to, email_id = %sent.id, "Email sent");
        Ok(sent.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
