//! Handlers for the admin inbox.
//!
//! Sending calls the email provider first and records the message in the
//! `sent` folder only after the provider accepted it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use deal4bank_core::error::CoreError;
use deal4bank_core::mailbox::{reply_subject, validate_transition, ComposeEmail, EmailStatus, REFINE_TONE};
use deal4bank_core::validation::is_blank;
use deal4bank_db::models::email::{Email, EmailListParams, SentEmail, SetStarred, UpdateEmailStatus};
use deal4bank_db::repositories::EmailRepo;
use deal4bank_db::DocumentStore;
use deal4bank_events::OutgoingEmail;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for replying to a received email.
#[derive(Debug, Deserialize)]
pub struct ReplyInput {
    #[serde(default)]
    pub body: String,
}

/// Body for the tone refinement assistant.
#[derive(Debug, Deserialize)]
pub struct RefineInput {
    #[serde(default)]
    pub content: String,
}

/// Outcome of a send. `recorded` is `false` when the provider accepted the
/// message but the local `sent` copy could not be written.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub provider_id: String,
    pub recorded: bool,
    pub email: Option<Email>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedDraft {
    pub refined_content: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn email_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Email",
        id: id.to_string(),
    })
}

async fn require_email(store: &dyn DocumentStore, id: &str) -> AppResult<Email> {
    EmailRepo::find(store, id)
        .await?
        .ok_or_else(|| email_not_found(id))
}

/// Deliver `compose` through the provider, then record it as sent.
async fn deliver_and_record(state: &AppState, compose: ComposeEmail) -> AppResult<(StatusCode, SendOutcome)> {
    compose.check()?;

    let provider_id = state
        .email_sender
        .send(&OutgoingEmail {
            to: compose.to.clone(),
            subject: compose.subject.clone(),
            text: compose.body.clone(),
        })
        .await?;
    tracing::info!(provider_id = %provider_id, to = %compose.to, "Email accepted by provider");

    let sent = SentEmail {
        email_id: Some(provider_id.clone()),
        from: state.email_config.admin_mailbox.clone(),
        to: compose.to,
        subject: compose.subject,
        body: compose.body,
    };

    match EmailRepo::create_sent(state.store.as_ref(), &sent).await {
        Ok(email) => Ok((
            StatusCode::CREATED,
            SendOutcome {
                provider_id,
                recorded: true,
                email: Some(email),
            },
        )),
        Err(e) => {
            tracing::error!(
                provider_id = %provider_id,
                error = %e,
                "Email was delivered but the sent copy could not be recorded"
            );
            Ok((
                StatusCode::OK,
                SendOutcome {
                    provider_id,
                    recorded: false,
                    email: None,
                },
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

/// GET /api/admin/emails?status=&starred=&limit=
pub async fn list_emails(
    State(state): State<AppState>,
    Query(params): Query<EmailListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .map(EmailStatus::parse)
        .transpose()?;
    let emails = EmailRepo::list(state.store.as_ref(), status, params.starred, params.limit).await?;
    Ok(Json(DataResponse { data: emails }))
}

/// GET /api/admin/emails/{id}
pub async fn get_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let email = require_email(state.store.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: email }))
}

/// PATCH /api/admin/emails/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let email = EmailRepo::mark_read(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| email_not_found(&id))?;
    Ok(Json(DataResponse { data: email }))
}

/// PATCH /api/admin/emails/{id}/star
///
/// Sets `starred` to the given value, or flips it when none is given.
pub async fn toggle_star(
    State(state): State<AppState>,
    Path(id): Path<String>,
    input: Option<Json<SetStarred>>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let current = require_email(store, &id).await?;
    let starred = input
        .and_then(|Json(body)| body.starred)
        .unwrap_or(!current.starred);

    let email = EmailRepo::set_starred(store, &id, starred)
        .await?
        .ok_or_else(|| email_not_found(&id))?;
    Ok(Json(DataResponse { data: email }))
}

/// PATCH /api/admin/emails/{id}/status
///
/// Move an email to another folder. Moves the mailbox does not allow
/// answer 409.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateEmailStatus>,
) -> AppResult<impl IntoResponse> {
    let store = state.store.as_ref();
    let next = EmailStatus::parse(&input.status)?;
    let current = require_email(store, &id).await?;
    validate_transition(current.status, next)?;

    let email = EmailRepo::set_status(store, &id, next)
        .await?
        .ok_or_else(|| email_not_found(&id))?;

    tracing::info!(
        email_id = %id,
        from = current.status.as_str(),
        to = next.as_str(),
        "Email moved"
    );
    Ok(Json(DataResponse { data: email }))
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

/// POST /api/admin/emails/send
pub async fn send_email(
    State(state): State<AppState>,
    Json(input): Json<ComposeEmail>,
) -> AppResult<impl IntoResponse> {
    let (status, outcome) = deliver_and_record(&state, input).await?;
    Ok((status, Json(DataResponse { data: outcome })))
}

/// POST /api/admin/emails/{id}/reply
///
/// Reply to the original sender with a `Re:` subject.
pub async fn reply_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReplyInput>,
) -> AppResult<impl IntoResponse> {
    let original = require_email(state.store.as_ref(), &id).await?;
    let compose = ComposeEmail {
        to: original.from,
        subject: reply_subject(&original.subject),
        body: input.body,
    };
    let (status, outcome) = deliver_and_record(&state, compose).await?;
    Ok((status, Json(DataResponse { data: outcome })))
}

// ---------------------------------------------------------------------------
// AI assistance
// ---------------------------------------------------------------------------

/// POST /api/admin/emails/{id}/summarize
pub async fn summarize_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let email = require_email(state.store.as_ref(), &id).await?;
    let summary = state.prompt_flow.summarize(&email.body).await?;
    Ok(Json(DataResponse {
        data: Summary { summary },
    }))
}

/// POST /api/admin/emails/refine
pub async fn refine_draft(
    State(state): State<AppState>,
    Json(input): Json<RefineInput>,
) -> AppResult<impl IntoResponse> {
    if is_blank(&input.content) {
        return Err(AppError::BadRequest("content must not be empty".into()));
    }
    let refined_content = state
        .prompt_flow
        .refine_tone(&input.content, REFINE_TONE)
        .await?;
    Ok(Json(DataResponse {
        data: RefinedDraft { refined_content },
    }))
}
