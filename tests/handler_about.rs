mod common;

use serde_json::{Value, json};
use short_url_service::application::bootstrap::ALGORITHM_DESCRIPTION;

#[tokio::test]
async fn test_get_about_seeded() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server.get("/api/about").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["description"], ALGORITHM_DESCRIPTION);
    assert_eq!(body["updated_by"], common::ADMIN_USERNAME);
}

#[tokio::test]
async fn test_get_about_missing() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/api/about").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "About information not found.");
}

#[tokio::test]
async fn test_update_about_as_user_forbidden() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;

    let response = server
        .put("/api/about")
        .authorization_bearer(&alice)
        .json(&json!({ "description": "hijacked" }))
        .await;

    assert_eq!(response.status_code(), 403);

    let body: Value = server.get("/api/about").await.json();
    assert_eq!(body["description"], ALGORITHM_DESCRIPTION);
}

#[tokio::test]
async fn test_update_about_as_admin() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let admin = common::admin_token(&server).await;

    let response = server
        .put("/api/about")
        .authorization_bearer(&admin)
        .json(&json!({ "description": "New description" }))
        .await;

    assert_eq!(response.status_code(), 204);

    let body: Value = server.get("/api/about").await.json();
    assert_eq!(body["description"], "New description");
    assert_eq!(body["updated_by"], common::ADMIN_USERNAME);
}

#[tokio::test]
async fn test_update_about_rejects_blank_and_oversized() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let admin = common::admin_token(&server).await;

    for description in ["   ".to_string(), "x".repeat(2001)] {
        let response = server
            .put("/api/about")
            .authorization_bearer(&admin)
            .json(&json!({ "description": description }))
            .await;

        assert_eq!(response.status_code(), 400);
    }
}

#[tokio::test]
async fn test_update_about_requires_auth() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .put("/api/about")
        .json(&json!({ "description": "anonymous" }))
        .await;

    assert_eq!(response.status_code(), 401);
}
