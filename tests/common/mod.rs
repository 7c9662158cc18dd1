#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection};
use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use tower::ServiceExt;

use game_catalog_api::auth::SecretSource;
use game_catalog_api::config::DatabaseConfig;
use game_catalog_api::database::Connector;
use game_catalog_api::{AppState, SharedState};

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// State whose connector points at a port nothing listens on, so any request
/// that reaches the store fails with a store fault.
pub fn unreachable_state(require_auth: bool) -> SharedState {
    let port = portpicker::pick_unused_port().expect("failed to pick free port");
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..DatabaseConfig::default()
    };
    let connector = Connector::from_config(&config).expect("options from parts");
    AppState::new(connector, SecretSource::Fixed(TEST_SECRET.to_vec()), require_auth)
}

/// Send one request through the router in-process
pub async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await.context("router call failed")?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, body))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("valid request")
}

/// `DATABASE_URL` when a live database is available for end-to-end tests
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Apply `sql/schema.sql` once per test binary
pub async fn ensure_schema(url: &str) -> Result<()> {
    SCHEMA
        .get_or_try_init(|| async {
            let mut conn = PgConnection::connect(url).await?;
            (&mut conn).execute(include_str!("../../sql/schema.sql")).await?;
            conn.close().await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    Ok(())
}

pub struct TestServer {
    pub base_url: String,
}

/// Serve the app on a free local port for the lifetime of the test runtime
pub async fn spawn_server(state: SharedState) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let app = game_catalog_api::app(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
    })
}

/// Live-database server with the gate enabled
pub async fn live_server(url: &str) -> Result<TestServer> {
    ensure_schema(url).await?;
    let config = DatabaseConfig {
        url: Some(url.to_string()),
        ..DatabaseConfig::default()
    };
    let connector = Connector::from_config(&config)?;
    let state = AppState::new(connector, SecretSource::Fixed(TEST_SECRET.to_vec()), true);
    spawn_server(state).await
}

pub async fn login(client: &reqwest::Client, server: &TestServer, username: &str) -> Result<String> {
    let res = client
        .post(format!("{}/login/", server.base_url))
        .form(&[("username", username), ("password", "irrelevant")])
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<Value>().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response missing token")
}

/// Unique suffix so tests sharing one database never collide
pub fn tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
