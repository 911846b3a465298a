//! HTTP-level tests for the notification bell and the dashboard summary.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_empty, post_empty, post_json, TestApp};
use serde_json::json;

async fn submit_inquiry(t: &TestApp, name: &str) {
    let response = post_json(
        t.app(),
        "/api/inquiries",
        json!({
            "fullName": name,
            "email": "lead@example.com",
            "phone": "9876543210",
            "city": "Pune",
            "state": "Maharashtra",
            "pincode": "411001",
            "serviceType": "Car Loan",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn notifications_can_be_read_one_by_one() {
    let t = build_test_app();
    submit_inquiry(&t, "Asha").await;
    submit_inquiry(&t, "Ravi").await;

    let json = body_json(get(t.app(), "/api/admin/notifications/unread-count").await).await;
    assert_eq!(json["data"]["unreadCount"], 2);

    let list = body_json(get(t.app(), "/api/admin/notifications").await).await;
    let id = list["data"][0]["id"].as_str().unwrap().to_string();

    let json = body_json(patch_empty(t.app(), &format!("/api/admin/notifications/{id}/read")).await).await;
    assert_eq!(json["data"]["read"], true);

    let unread = body_json(get(t.app(), "/api/admin/notifications?unread=true").await).await;
    assert_eq!(unread["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn read_all_clears_the_bell() {
    let t = build_test_app();
    submit_inquiry(&t, "Asha").await;
    submit_inquiry(&t, "Ravi").await;

    let json = body_json(post_empty(t.app(), "/api/admin/notifications/read-all").await).await;
    assert_eq!(json["data"]["updated"], 2);

    let json = body_json(get(t.app(), "/api/admin/notifications/unread-count").await).await;
    assert_eq!(json["data"]["unreadCount"], 0);

    let json = body_json(post_empty(t.app(), "/api/admin/notifications/read-all").await).await;
    assert_eq!(json["data"]["updated"], 0);
}

#[tokio::test]
async fn list_honours_limit() {
    let t = build_test_app();
    for name in ["A", "B", "C"] {
        submit_inquiry(&t, name).await;
    }

    let list = body_json(get(t.app(), "/api/admin/notifications?limit=2").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn marking_missing_notification_returns_404() {
    let t = build_test_app();
    let response = patch_empty(t.app(), "/api/admin/notifications/missing/read").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_counts_open_work() {
    let t = build_test_app();
    submit_inquiry(&t, "Asha").await;
    submit_inquiry(&t, "Ravi").await;
    post_json(
        t.app(),
        "/api/webhooks/resend",
        json!({
            "type": "email.received",
            "data": { "from": "meera@example.com", "to": ["admin@deal4bank.com"], "subject": "Hi", "text": "Hello" }
        }),
    )
    .await;

    let json = body_json(get(t.app(), "/api/admin/dashboard").await).await;
    assert_eq!(
        json["data"],
        json!({
            "inquiries": { "pending": 2, "contacted": 0, "closed": 0 },
            "unreadEmails": 1,
            "unreadNotifications": 3,
            "liveSessions": 0,
        })
    );
}
