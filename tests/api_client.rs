//! Backend API client against a mock backend.

use std::time::Duration;

use securflow_gate::api::{ApiClient, ApiError};
use securflow_gate::billing::{PlanTier, VoucherCode};

mod common;

use common::MockUpstream;

fn api_for(mock: &MockUpstream) -> ApiClient {
    ApiClient::new(&format!("http://{}/api/v1", mock.addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_login_stores_token() {
    let mock = MockUpstream::json(
        200,
        r#"{"access_token":"tok-1","refresh_token":"ref-1","token_type":"bearer"}"#,
    )
    .await;
    let mut api = api_for(&mock);

    let token = api.login("user@example.com", "hunter2").await.unwrap();
    assert_eq!(token.access_token, "tok-1");
    assert_eq!(api.token(), Some("tok-1"));

    let recorded = mock.last_request().unwrap();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.target, "/api/v1/auth/token");
    assert!(recorded
        .header("content-type")
        .unwrap()
        .starts_with("application/x-www-form-urlencoded"));
    assert!(recorded.body.contains("username=user%40example.com"));
}

#[tokio::test]
async fn test_bearer_token_sent() {
    let mock = MockUpstream::json(200, r#"[{"hubId":"00A1","hubName":"Home"}]"#).await;
    let api = api_for(&mock).with_token("tok-1");

    let hubs = api.list_hubs().await.unwrap();
    assert_eq!(hubs.len(), 1);
    assert_eq!(hubs[0].id, "00A1");

    let recorded = mock.last_request().unwrap();
    assert_eq!(recorded.target, "/api/v1/ajax/hubs");
    assert_eq!(recorded.header("authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_missing_hub_log_is_empty() {
    let mock = MockUpstream::json(404, r#"{"detail":"Not Found"}"#).await;
    let api = api_for(&mock).with_token("tok-1");

    let logs = api.hub_logs("00A1", 50, 0).await.unwrap();
    assert!(logs.logs.is_empty());
    assert_eq!(logs.total_count, 0);

    let recorded = mock.last_request().unwrap();
    assert_eq!(recorded.target, "/api/v1/ajax/hubs/00A1/logs?limit=50&offset=0");
}

#[tokio::test]
async fn test_missing_devices_still_errors() {
    let mock = MockUpstream::json(404, r#"{"detail":"Hub not found"}"#).await;
    let api = api_for(&mock).with_token("tok-1");

    let err = api.hub_devices("00A1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_plan_denial_carries_detail() {
    let mock = MockUpstream::json(403, r#"{"detail":"Active subscription required"}"#).await;
    let api = api_for(&mock).with_token("tok-1");

    match api.hub_logs("00A1", 100, 0).await {
        Err(ApiError::Status { status, detail }) => {
            assert_eq!(status, 403);
            assert_eq!(detail.as_deref(), Some("Active subscription required"));
        }
        other => panic!("expected 403, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_session_is_unauthorized() {
    let mock = MockUpstream::json(401, r#"{"detail":"Could not validate credentials"}"#).await;
    let api = api_for(&mock);

    let err = api.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_redeem_sends_normalized_code() {
    let mock = MockUpstream::json(
        200,
        r#"{"code":"AJAX-2024-X8K2","duration_days":30,"is_redeemed":true,"redeemed_at":"2024-05-01T10:00:00"}"#,
    )
    .await;
    let api = api_for(&mock).with_token("tok-1");

    let code = VoucherCode::parse(" ajax-2024-x8k2 ").unwrap();
    let redeemed = api.redeem_voucher(&code).await.unwrap();
    assert_eq!(redeemed.duration_days, 30);

    let recorded = mock.last_request().unwrap();
    assert_eq!(recorded.target, "/api/v1/billing/redeem");
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body, serde_json::json!({"code": "AJAX-2024-X8K2"}));
}

#[tokio::test]
async fn test_checkout_sends_plan() {
    let mock = MockUpstream::json(200, r#"{"url":"https://checkout.example/session"}"#).await;
    let api = api_for(&mock).with_token("tok-1");

    let session = api.create_checkout_session(PlanTier::Premium).await.unwrap();
    assert_eq!(session.url, "https://checkout.example/session");

    let recorded = mock.last_request().unwrap();
    assert_eq!(recorded.target, "/api/v1/billing/create-checkout-session");
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body["plan_type"], "premium");
}

#[tokio::test]
async fn test_notification_summary() {
    let mock = MockUpstream::json(
        200,
        r#"{"unread_count":1,"notifications":[{"id":4,"title":"Hub offline","message":"Home went offline",
            "type":"warning","link":null,"is_read":false,"created_at":"2024-05-01T10:00:00"}]}"#,
    )
    .await;
    let api = api_for(&mock).with_token("tok-1");

    let summary = api.notification_summary().await.unwrap();
    assert_eq!(summary.unread_count, 1);
    assert_eq!(summary.notifications[0].kind, "warning");
    assert_eq!(mock.last_request().unwrap().target, "/api/v1/notifications/summary");
}

#[tokio::test]
async fn test_mark_all_read_and_logout() {
    let mock = MockUpstream::json(200, r#"{"detail":"ok"}"#).await;
    let mut api = api_for(&mock).with_token("tok-1");

    api.mark_all_notifications_read().await.unwrap();
    assert_eq!(mock.last_request().unwrap().target, "/api/v1/notifications/mark-all-read");

    api.logout().await.unwrap();
    assert_eq!(api.token(), None);
    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].target, "/api/v1/auth/logout");
}
