use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use deal4bank_assist::PromptFlowError;
use deal4bank_core::error::CoreError;
use deal4bank_db::StoreError;
use deal4bank_events::EmailError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the library error types and adds HTTP-specific variants.
/// Every response body carries `success: false`, an `error` message and a
/// machine-readable `code`; field validation failures add an `errors` map.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `deal4bank_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The email provider call failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// The AI prompt flow call failed.
    #[error("AI error: {0}")]
    Ai(#[from] PromptFlowError),

    /// The request body was not JSON, or too large.
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message used whenever internal detail must not leak to clients.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidFields(errors) => {
                    let body = json!({
                        "success": false,
                        "error": core.to_string(),
                        "code": "VALIDATION_ERROR",
                        "errors": errors,
                    });
                    return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- External services ---
            AppError::Email(err) => match err {
                EmailError::NotConfigured(setting) => {
                    tracing::error!(setting, "Email delivery is not configured");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "CONFIG_ERROR",
                        err.to_string(),
                    )
                }
                EmailError::Api { message, .. } => {
                    tracing::error!(error = %err, "Email provider rejected message");
                    (
                        StatusCode::BAD_GATEWAY,
                        "EMAIL_ERROR",
                        format!("Failed to send email: {message}"),
                    )
                }
                EmailError::Request(_) => {
                    tracing::error!(error = %err, "Email provider unreachable");
                    (
                        StatusCode::BAD_GATEWAY,
                        "EMAIL_ERROR",
                        "Failed to send email".to_string(),
                    )
                }
            },
            AppError::Ai(err) => match err {
                PromptFlowError::NotConfigured => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIG_ERROR",
                    err.to_string(),
                ),
                _ => {
                    tracing::error!(error = %err, "Prompt flow failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "AI_ERROR",
                        "The AI assistant could not complete the request".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::Body(rejection) => (rejection.status(), "INVALID_BODY", rejection.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Duplicate ids map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Duplicate { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        other => {
            tracing::error!(error = %other, "Store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
