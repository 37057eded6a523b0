mod common;

use short_url_service::api::dto::health::HealthResponse;

#[tokio::test]
async fn test_health_check_success() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(body.checks.database.status, "ok");
}

#[tokio::test]
async fn test_health_reports_entry_count() {
    let server = common::create_test_server(common::create_seeded_state().await);
    let alice = common::register(&server, "alice").await;
    common::shorten(&server, &alice, "https://example.com/a").await;

    let body: HealthResponse = server.get("/health").await.json();

    assert_eq!(
        body.checks.database.message.as_deref(),
        Some("Connected, 1 short URLs")
    );
}
