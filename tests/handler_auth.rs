mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_register_returns_user_token() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "User");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_and_username() {
    let server = common::create_test_server(common::create_seeded_state().await);
    common::register(&server, "alice").await;

    let same_email = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "username": "alice2",
            "password": "password123",
        }))
        .await;
    assert_eq!(same_email.status_code(), 400);
    let body: Value = same_email.json();
    assert_eq!(
        body["error"]["message"],
        "User creation failed: Email is already taken."
    );

    let same_username = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "other@example.com",
            "username": "alice",
            "password": "password123",
        }))
        .await;
    assert_eq!(same_username.status_code(), 400);
    let body: Value = same_username.json();
    assert_eq!(
        body["error"]["message"],
        "User creation failed: Username is already taken."
    );
}

#[tokio::test]
async fn test_register_validation() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "nope",
            "username": "has space",
            "password": "123",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    let fields = &body["error"]["details"]["fields"];
    assert!(fields.get("email").is_some());
    assert!(fields.get("username").is_some());
    assert!(fields.get("password").is_some());
}

#[tokio::test]
async fn test_login_success_and_me() {
    let server = common::create_test_server(common::create_seeded_state().await);
    common::register(&server, "alice").await;

    let token = common::login(&server, "alice@example.com", "password123").await;

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "User");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = common::create_test_server(common::create_seeded_state().await);
    common::register(&server, "alice").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": "password123" }))
        .await;

    assert_eq!(wrong_password.status_code(), 401);
    assert_eq!(unknown_email.status_code(), 401);
    let a: Value = wrong_password.json();
    let b: Value = unknown_email.json();
    assert_eq!(a, b);
    assert_eq!(a["error"]["message"], "Invalid email or password.");
}

#[tokio::test]
async fn test_admin_login_carries_admin_role() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": common::ADMIN_EMAIL,
            "password": common::ADMIN_PASSWORD,
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["role"], "Admin");
    assert_eq!(body["username"], common::ADMIN_USERNAME);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(
        body["error"]["details"]["reason"],
        "Authorization header is missing or invalid"
    );
}

#[tokio::test]
async fn test_login_is_rate_limited() {
    use axum_test::TestServer;
    use short_url_service::routes::build_router;

    let app = build_router(common::create_seeded_state().await, true)
        .layer(common::MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    let mut statuses = Vec::new();
    for _ in 0..11 {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "ghost@example.com", "password": "password123" }))
            .await;
        statuses.push(response.status_code().as_u16());
    }

    assert!(statuses[..10].iter().all(|&s| s == 401));
    assert_eq!(statuses[10], 429);
}
