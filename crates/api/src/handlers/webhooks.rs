//! Inbound webhook from the email provider.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use deal4bank_core::mailbox::{EMPTY_BODY, UNKNOWN_RECIPIENT};
use deal4bank_db::models::email::InboundEmail;
use deal4bank_db::repositories::EmailRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Event type for a message delivered to one of our addresses.
pub const EMAIL_RECEIVED: &str = "email.received";

/// Payload of an `email.received` event. Missing and `null` fields both
/// fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReceivedEmail {
    pub email_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ReceivedEmail> for InboundEmail {
    fn from(data: ReceivedEmail) -> Self {
        let body = [data.text, data.html]
            .into_iter()
            .flatten()
            .find(|b| !b.is_empty())
            .unwrap_or_else(|| EMPTY_BODY.to_string());
        Self {
            email_id: data.email_id,
            from: data.from,
            to: data
                .to
                .into_iter()
                .next()
                .unwrap_or_else(|| UNKNOWN_RECIPIENT.to_string()),
            subject: data.subject,
            body,
            attachments: data.attachments,
        }
    }
}

/// POST /api/webhooks/resend
///
/// Record received mail in the inbox with its admin notification. Every
/// other event type is acknowledged and ignored whatever its payload looks
/// like; `data` is only decoded once the type is known.
pub async fn receive_provider_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(event) = payload?;
    let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();
    if event_type != EMAIL_RECEIVED {
        tracing::debug!(event_type, "Provider event ignored");
        return Ok(Json(json!({ "success": true, "message": "Event ignored" })));
    }

    let received = match event.get("data") {
        None | Some(Value::Null) => ReceivedEmail::default(),
        Some(data) => ReceivedEmail::deserialize(data).map_err(|e| {
            AppError::BadRequest(format!("Invalid {EMAIL_RECEIVED} payload: {e}"))
        })?,
    };
    let inbound = InboundEmail::from(received);
    let (email, notification) =
        EmailRepo::record_inbound_with_notification(state.store.as_ref(), &inbound).await?;

    tracing::info!(
        email_id = %email.id,
        notification_id = %notification.id,
        from = %email.from,
        "Inbound email recorded"
    );
    Ok(Json(json!({
        "success": true,
        "message": "Email and notification recorded",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_body_preferred_over_html() {
        let inbound = InboundEmail::from(ReceivedEmail {
            from: "a@x.com".into(),
            to: vec!["admin@deal4bank.com".into()],
            text: Some("plain".into()),
            html: Some("<p>rich</p>".into()),
            ..Default::default()
        });
        assert_eq!(inbound.body, "plain");
        assert_eq!(inbound.to, "admin@deal4bank.com");
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let inbound = InboundEmail::from(ReceivedEmail {
            from: "a@x.com".into(),
            ..Default::default()
        });
        assert_eq!(inbound.body, EMPTY_BODY);
        assert_eq!(inbound.to, UNKNOWN_RECIPIENT);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let data: ReceivedEmail = serde_json::from_value(json!({
            "from": "meera@example.com",
            "to": null,
            "subject": null,
            "text": null,
            "attachments": null,
        }))
        .unwrap();
        assert_eq!(data.subject, "");
        let inbound = InboundEmail::from(data);
        assert_eq!(inbound.from, "meera@example.com");
        assert_eq!(inbound.to, UNKNOWN_RECIPIENT);
        assert_eq!(inbound.body, EMPTY_BODY);
    }

    #[test]
    fn html_used_when_text_missing() {
        let inbound = InboundEmail::from(ReceivedEmail {
            html: Some("<p>rich</p>".into()),
            ..Default::default()
        });
        assert_eq!(inbound.body, "<p>rich</p>");
    }
}
