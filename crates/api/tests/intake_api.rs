//! HTTP-level tests for public lead intake and admin inquiry management.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json, post_raw, TestApp};
use serde_json::{json, Value};
use deal4bank_db::collections::NOTIFICATIONS;
use deal4bank_db::store::ListQuery;
use deal4bank_db::DocumentStore;

fn valid_form() -> Value {
    json!({
        "fullName": "Asha Rao",
        "email": "asha@example.com",
        "phone": "9876543210",
        "city": "Mumbai",
        "state": "Maharashtra",
        "pincode": "400001",
        "serviceType": "Home Loan",
    })
}

fn form_with(field: &str, value: &str) -> Value {
    let mut form = valid_form();
    form[field] = json!(value);
    form
}

async fn submit(t: &TestApp, form: Value) -> String {
    let response = post_json(t.app(), "/api/inquiries", form).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn intake_records_pending_inquiry_and_notification() {
    let t = build_test_app();
    let response = post_json(t.app(), "/api/inquiries", valid_form()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Inquiry received and recorded");
    let id = json["id"].as_str().unwrap();

    let inquiry = body_json(get(t.app(), &format!("/api/admin/inquiries/{id}")).await).await;
    assert_eq!(inquiry["data"]["status"], "pending");
    assert_eq!(inquiry["data"]["service"], "Home Loan");
    assert_eq!(inquiry["data"]["fullName"], "Asha Rao");

    let notifications = body_json(get(t.app(), "/api/admin/notifications").await).await;
    let list = notifications["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["type"], "NEW_INQUIRY");
    assert_eq!(list[0]["title"], "New Service Inquiry");
    assert_eq!(list[0]["message"], "Asha Rao applied for Home Loan");
    assert_eq!(list[0]["inquiryId"], id);
    assert_eq!(list[0]["read"], false);
}

#[tokio::test]
async fn short_phone_is_rejected_and_ten_digits_accepted() {
    let t = build_test_app();

    let response = post_json(t.app(), "/api/inquiries", form_with("phone", "12345")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["errors"],
        json!({ "phone": ["Please enter a valid 10-digit phone number"] })
    );

    submit(&t, form_with("phone", "9876543210")).await;
}

#[tokio::test]
async fn short_pincode_is_rejected_and_six_digits_accepted() {
    let t = build_test_app();

    let response = post_json(t.app(), "/api/inquiries", form_with("pincode", "4000")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"]["pincode"],
        json!(["Please enter a valid 6-digit pincode"])
    );

    submit(&t, form_with("pincode", "400001")).await;
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let t = build_test_app();
    let response = post_json(t.app(), "/api/inquiries", json!({ "email": "not-an-email" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors = body_json(response).await["errors"].clone();
    assert_eq!(errors["fullName"], json!(["Full name is required"]));
    assert_eq!(errors["email"], json!(["Please enter a valid email"]));
    assert_eq!(errors["serviceType"], json!(["Service type is required"]));
    assert!(errors["phone"].is_array());
    assert!(errors["pincode"].is_array());
}

#[tokio::test]
async fn non_ascii_digits_are_rejected() {
    let t = build_test_app();

    let response = post_json(t.app(), "/api/inquiries", form_with("phone", "९८७६५४३२१०")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        json!({ "phone": ["Please enter a valid 10-digit phone number"] })
    );

    let response = post_json(t.app(), "/api/inquiries", form_with("pincode", "４００００１")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        json!({ "pincode": ["Please enter a valid 6-digit pincode"] })
    );
}

#[tokio::test]
async fn wrongly_typed_fields_are_field_errors() {
    let t = build_test_app();
    let mut form = valid_form();
    form["phone"] = json!(9876543210u64);
    form["city"] = Value::Null;

    let response = post_json(t.app(), "/api/inquiries", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"],
        json!({
            "phone": ["Expected string, received number"],
            "city": ["Expected string, received null"],
        })
    );
}

#[tokio::test]
async fn malformed_json_gets_an_error_body() {
    let t = build_test_app();

    let response = post_raw(t.app(), "/api/inquiries", "{\"fullName\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "INVALID_BODY");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let t = build_test_app();

    let response = post_json(t.app(), "/api/inquiries", json!(["Asha"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn invalid_submission_writes_nothing() {
    let t = build_test_app();
    post_json(t.app(), "/api/inquiries", form_with("phone", "12")).await;

    let count = t
        .store
        .count(NOTIFICATIONS, &ListQuery::new())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn store_failure_returns_500() {
    let t = build_test_app();
    t.store.set_unavailable(true);

    let response = post_json(t.app(), "/api/inquiries", valid_form()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn inquiries_can_be_filtered_by_status() {
    let t = build_test_app();
    let first = submit(&t, valid_form()).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    submit(&t, form_with("fullName", "Ravi Kumar")).await;

    let response = patch_json(
        t.app(),
        &format!("/api/admin/inquiries/{first}/status"),
        json!({ "status": "contacted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let all = body_json(get(t.app(), "/api/admin/inquiries").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
    assert_eq!(all["data"][0]["fullName"], "Ravi Kumar");

    let contacted = body_json(get(t.app(), "/api/admin/inquiries?status=contacted").await).await;
    assert_eq!(contacted["data"].as_array().unwrap().len(), 1);
    assert_eq!(contacted["data"][0]["id"], first.as_str());
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let t = build_test_app();
    let id = submit(&t, valid_form()).await;

    let response = patch_json(
        t.app(),
        &format!("/api/admin/inquiries/{id}/status"),
        json!({ "status": "archived" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(t.app(), "/api/admin/inquiries?status=archived").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn follow_up_date_can_be_set_and_cleared() {
    let t = build_test_app();
    let id = submit(&t, valid_form()).await;
    let uri = format!("/api/admin/inquiries/{id}/follow-up");

    let json = body_json(patch_json(t.app(), &uri, json!({ "followUpDate": "2026-11-02" })).await).await;
    assert_eq!(json["data"]["followUpDate"], "2026-11-02");

    let json = body_json(patch_json(t.app(), &uri, json!({ "followUpDate": null })).await).await;
    assert_eq!(json["data"]["followUpDate"], Value::Null);
}

#[tokio::test]
async fn deleted_inquiry_is_gone() {
    let t = build_test_app();
    let id = submit(&t, valid_form()).await;
    let uri = format!("/api/admin/inquiries/{id}");

    assert_eq!(delete(t.app(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(t.app(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(t.app(), &uri).await.status(), StatusCode::NOT_FOUND);
}
