mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_create_url_success() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let token = common::register(&server, "alice").await;

    let response = server
        .post("/api/urls")
        .authorization_bearer(&token)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_url_requires_auth() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .post("/api/urls")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_create_url_rejects_forged_token() {
    let server = common::create_test_server(common::create_seeded_state().await);

    let response = server
        .post("/api/urls")
        .authorization_bearer("not.a.jwt")
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["reason"], "Invalid or expired token");
}

#[tokio::test]
async fn test_create_url_invalid_url() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let token = common::register(&server, "alice").await;

    for bad in ["not-a-url", "", "ftp://example.com/file"] {
        let response = server
            .post("/api/urls")
            .authorization_bearer(&token)
            .json(&json!({ "original_url": bad }))
            .await;

        assert_eq!(response.status_code(), 400, "accepted {:?}", bad);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn test_create_duplicate_url_conflicts_across_owners() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let bob = common::register(&server, "bob").await;

    common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server
        .post("/api/urls")
        .authorization_bearer(&bob)
        .json(&json!({ "original_url": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "This URL already exists.");
}

#[tokio::test]
async fn test_get_url_returns_owner() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    let me: Value = server
        .get("/api/auth/me")
        .authorization_bearer(&alice)
        .await
        .json();

    let response = server
        .get(&format!("/api/urls/{}", id))
        .authorization_bearer(&alice)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["original_url"], "https://example.com/a");
    assert_eq!(body["created_by_user_id"], me["id"]);
    assert_eq!(body["created_by_username"], "alice");
    assert_eq!(body["short_code"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_get_url_requires_auth() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server.get(&format!("/api/urls/{}", id)).await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_get_url_not_found() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;

    let response = server
        .get(&format!("/api/urls/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&alice)
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Short URL not found.");
}

#[tokio::test]
async fn test_list_hides_owner_for_anonymous_callers() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    common::shorten(&server, &alice, "https://example.com/a").await;
    common::shorten(&server, &alice, "https://example.com/b").await;

    let anonymous: Value = server.get("/api/urls").await.json();
    let entries = anonymous.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert!(entry.get("created_by_user_id").is_none());
        assert!(entry.get("id").is_none());
        assert_eq!(entry["created_by_username"], "alice");
    }

    let authenticated: Value = server
        .get("/api/urls")
        .authorization_bearer(&alice)
        .await
        .json();
    for entry in authenticated.as_array().unwrap() {
        assert!(entry.get("created_by_user_id").is_some());
        assert!(entry.get("id").is_some());
    }
}

#[tokio::test]
async fn test_list_with_invalid_token_is_anonymous() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server
        .get("/api/urls")
        .authorization_bearer("garbage")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body[0].get("created_by_user_id").is_none());
}

#[tokio::test]
async fn test_list_is_most_recent_first() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    common::shorten(&server, &alice, "https://example.com/first").await;
    common::shorten(&server, &alice, "https://example.com/second").await;

    let body: Value = server.get("/api/urls").await.json();

    assert_eq!(body[0]["original_url"], "https://example.com/second");
    assert_eq!(body[1]["original_url"], "https://example.com/first");
}

#[tokio::test]
async fn test_delete_by_other_user_forbidden() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let bob = common::register(&server, "bob").await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server
        .delete(&format!("/api/urls/{}", id))
        .authorization_bearer(&bob)
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(
        body["error"]["message"],
        "You can only delete your own short URLs."
    );
}

#[tokio::test]
async fn test_delete_by_owner_then_gone() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server
        .delete(&format!("/api/urls/{}", id))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), 204);

    let again = server
        .delete(&format!("/api/urls/{}", id))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn test_delete_by_admin_allowed() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let admin = common::admin_token(&server).await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    let response = server
        .delete(&format!("/api/urls/{}", id))
        .authorization_bearer(&admin)
        .await;

    assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn test_deleted_url_can_be_shortened_again() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    let id = common::shorten(&server, &alice, "https://example.com/a").await;

    server
        .delete(&format!("/api/urls/{}", id))
        .authorization_bearer(&alice)
        .await;

    let new_id = common::shorten(&server, &alice, "https://example.com/a").await;
    assert_ne!(new_id, id);
}
