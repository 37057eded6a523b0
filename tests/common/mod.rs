#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::{Value, json};
use short_url_service::application::bootstrap::{AdminSeed, SeedConfig};
use short_url_service::infrastructure::persistence::Repositories;
use short_url_service::routes::build_router;
use short_url_service::state::{AppState, TokenSettings};
use std::net::SocketAddr;
use tower::Layer;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Low work factor so account-heavy tests stay fast.
pub const PASSWORD_ITERATIONS: u32 = 1_000;

pub fn token_settings() -> TokenSettings {
    TokenSettings {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        issuer: "short-url-service".to_string(),
        audience: "short-url-service".to_string(),
        ttl: chrono::Duration::hours(1),
    }
}

/// Fresh in-memory state with the default code length.
pub fn create_test_state() -> AppState {
    AppState::new(
        Repositories::in_memory(),
        &token_settings(),
        8,
        PASSWORD_ITERATIONS,
    )
}

pub fn admin_seed() -> AdminSeed {
    AdminSeed {
        email: ADMIN_EMAIL.to_string(),
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
}

/// State after the startup phase has seeded roles, the admin and the about record.
pub async fn create_seeded_state() -> AppState {
    let state = create_test_state();
    state
        .bootstrap()
        .run(&SeedConfig {
            admin: Some(admin_seed()),
            demo_data: false,
        })
        .await
        .unwrap();
    state
}

/// Server over the router without the peer-IP rate limiter.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, false)).unwrap()
}

/// Registers an account and returns its bearer token.
pub async fn register(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": format!("{}@example.com", username),
            "username": username,
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    assert_eq!(response.status_code(), 200);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn admin_token(server: &TestServer) -> String {
    login(server, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Shortens `url` as the bearer of `token` and returns the new id.
pub async fn shorten(server: &TestServer, token: &str, url: &str) -> String {
    let response = server
        .post("/api/urls")
        .authorization_bearer(token)
        .json(&json!({ "original_url": url }))
        .await;

    assert_eq!(response.status_code(), 201);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

/// Injects a fixed peer address so the rate limiter can key requests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
