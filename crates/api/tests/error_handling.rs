//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no HTTP server
//! is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use deal4bank_api::error::AppError;
use deal4bank_assist::PromptFlowError;
use deal4bank_core::error::CoreError;
use deal4bank_core::validation::FieldErrors;
use deal4bank_db::StoreError;
use deal4bank_events::EmailError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Inquiry",
        id: "abc".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Inquiry with id abc not found");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field value".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Cannot move an email from sent to inbox".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn field_errors_are_listed_per_field() {
    let mut errors = FieldErrors::new();
    errors.insert(
        "phone".to_string(),
        vec!["Please enter a valid 10-digit phone number".to_string()],
    );

    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidFields(errors))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"]["phone"][0],
        "Please enter a valid 10-digit phone number"
    );
}

#[tokio::test]
async fn store_errors_are_sanitized() {
    let err = AppError::Store(StoreError::Unavailable("connection reset by peer".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn duplicate_document_returns_409() {
    let err = AppError::Store(StoreError::Duplicate {
        collection: "inquiries".into(),
        id: "abc".into(),
    });

    let (status, _) = error_to_response(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn email_errors_map_to_config_and_gateway() {
    let (status, json) = error_to_response(AppError::Email(EmailError::NotConfigured("RESEND_API_KEY"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "CONFIG_ERROR");

    let err = AppError::Email(EmailError::Api {
        status: 422,
        message: "Invalid `to` field".into(),
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "EMAIL_ERROR");
    assert_eq!(json["error"], "Failed to send email: Invalid `to` field");
}

#[tokio::test]
async fn ai_errors_map_to_config_and_gateway() {
    let (status, json) = error_to_response(AppError::Ai(PromptFlowError::NotConfigured)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "CONFIG_ERROR");

    let err = AppError::Ai(PromptFlowError::ApiError {
        status: 500,
        body: "internal stack trace".into(),
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "AI_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("stack trace"));
}
