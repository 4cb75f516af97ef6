//! API integration tests
//!
//! Route-level tests over the real router with a database-less state:
//! pages, authentication rejections, webhook gating and the 503 behavior
//! of database-backed endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;

use alerttrail::routes::create_router;
use alerttrail::server::{AppState, Settings};

fn test_settings() -> Settings {
    Settings {
        secret_key: "integration-test-secret".to_string(),
        access_token_expire_minutes: 60,
        cors_origins: "*".to_string(),
        cookie_domain: None,
        admin_setup_secret: Some("setup-secret".to_string()),
        admin_email: Some("admin@example.com".to_string()),
        admin_pass: Some("adminpass123".to_string()),
        admin_name: "Admin".to_string(),
        fact_api_key: None,
        fact_cuit: None,
        fact_pto_vta: 1,
    }
}

fn create_test_server() -> TestServer {
    let state = AppState::new(test_settings(), None);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_root_banner() {
    let server = create_test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "AlertTrail API");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_page_serves_form() {
    let server = create_test_server();

    let response = server.get("/auth/login").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("<form"));
    assert!(body.contains("/auth/login/web"));
}

#[tokio::test]
async fn test_me_without_credentials() {
    let server = create_test_server();

    let response = server.get("/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    let body: serde_json::Value = response.json();
    assert_eq!(body["detail"], "Not authenticated");
}

#[tokio::test]
async fn test_me_with_garbage_bearer_token() {
    let server = create_test_server();

    let response = server
        .get("/auth/me")
        .add_header("Authorization", "Bearer not.a.token")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_valid_token_but_no_database_is_503() {
    let server = create_test_server();

    // The token decodes, so resolution reaches for the missing database
    let token =
        alerttrail::auth::sessions::create_token("user@example.com", &test_settings()).unwrap();

    let response = server
        .get("/auth/me")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_analysis_requires_authentication() {
    let server = create_test_server();

    let response = server.get("/analysis").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/analysis")
        .json(&serde_json::json!({ "title": "t", "content": "c" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_without_database_is_503() {
    let server = create_test_server();

    let response = server
        .post("/auth/register")
        .json(&serde_json::json!({
            "email": "user@example.com",
            "name": "User",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["detail"], "Database not configured");
}

#[tokio::test]
async fn test_login_without_database_is_503() {
    let server = create_test_server();

    let response = server
        .post("/auth/login")
        .json(&serde_json::json!({
            "email": "user@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_dashboard_redirects_anonymous_to_login() {
    let server = create_test_server();

    let response = server.get("/dashboard").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/auth/login");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_redirects() {
    let server = create_test_server();

    let response = server.get("/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/auth/login");

    // Removal cookie for access_token
    let set_cookie = response.header("set-cookie");
    assert!(set_cookie.to_str().unwrap().starts_with("access_token="));
}

#[tokio::test]
async fn test_webhook_skips_unpaid_payment() {
    let server = create_test_server();

    let response = server
        .post("/webhooks/mpago")
        .json(&serde_json::json!({ "data": { "status": "pending" } }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["skipped"], true);
}

#[tokio::test]
async fn test_webhook_approved_payment_without_payer_is_400() {
    let server = create_test_server();

    let response = server
        .post("/webhooks/mpago")
        .json(&serde_json::json!({ "status": "approved" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_reset_wrong_secret_is_403() {
    let server = create_test_server();

    let response = server
        .post("/auth/_force_admin_reset?secret=wrong")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["detail"], "forbidden");
}

#[tokio::test]
async fn test_admin_reset_right_secret_without_database_is_503() {
    let server = create_test_server();

    let response = server
        .post("/auth/_force_admin_reset?secret=setup-secret")
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = create_test_server();

    let response = server.get("/definitely-not-a-route").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
