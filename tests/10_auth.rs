mod common;

use anyhow::Result;
use axum::{body::Body, http::Request, http::StatusCode};
use serde_json::json;

use common::{json_request, send, unreachable_state, TEST_SECRET};
use game_catalog_api::app;
use game_catalog_api::auth::issue_token;

const GENRE_BODY: &str = r#"{"name":"Platformer"}"#;

fn raw_auth_request(method: &str, uri: &str, authorization: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", authorization)
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn write_without_header_is_unauthorized() -> Result<()> {
    let app = app(unreachable_state(true));

    let (status, body) = send(app, json_request("POST", "/genres/", None, GENRE_BODY)).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "message": "provide your token using the Authorization header and Bearer schema." })
    );
    Ok(())
}

#[tokio::test]
async fn scheme_without_token_is_unauthorized() -> Result<()> {
    let app = app(unreachable_state(true));

    let request = raw_auth_request("POST", "/genres/", "Bearer", GENRE_BODY);
    let (status, body) = send(app, request).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn wrong_scheme_is_unauthorized() -> Result<()> {
    let token = issue_token("mario", TEST_SECRET)?;
    let app = app(unreachable_state(true));

    let request = raw_auth_request("POST", "/genres/", &format!("Basic {}", token), GENRE_BODY);
    let (status, _) = send(app, request).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() -> Result<()> {
    let token = issue_token("mario", b"some-other-secret")?;
    let app = app(unreachable_state(true));

    let (status, body) =
        send(app, json_request("POST", "/genres/", Some(&token), GENRE_BODY)).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid token" }));
    Ok(())
}

#[tokio::test]
async fn every_write_route_is_gated() -> Result<()> {
    let writes = [
        ("POST", "/games"),
        ("PUT", "/games/"),
        ("DELETE", "/games/1/delete"),
        ("POST", "/genres/"),
        ("PUT", "/genres/"),
        ("DELETE", "/genres/1/delete"),
        ("POST", "/platforms/"),
        ("PUT", "/platforms/"),
        ("DELETE", "/platforms/1/delete"),
    ];

    for (method, uri) in writes {
        let app = app(unreachable_state(true));
        let (status, _) = send(app, json_request(method, uri, None, "{}")).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
    Ok(())
}

#[tokio::test]
async fn valid_token_with_bad_json_is_bad_request() -> Result<()> {
    let token = issue_token("mario", TEST_SECRET)?;
    let app = app(unreachable_state(true));

    let (status, body) =
        send(app, json_request("POST", "/genres/", Some(&token), "{not json")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn valid_token_reaches_the_store() -> Result<()> {
    let token = issue_token("mario", TEST_SECRET)?;
    let app = app(unreachable_state(true));

    // Lower-case scheme is accepted too
    let request = raw_auth_request(
        "PUT",
        "/platforms/",
        &format!("bearer {}", token),
        r#"{"id":1,"name":"Switch"}"#,
    );
    let (status, body) = send(app, request).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn gate_disabled_lets_writes_through() -> Result<()> {
    let app = app(unreachable_state(false));

    let (status, _) = send(app, json_request("POST", "/genres/", None, GENRE_BODY)).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn reads_are_public() -> Result<()> {
    for uri in ["/games", "/games/1", "/genres/", "/genres/RPG", "/platforms/", "/platforms/1/games"] {
        let app = app(unreachable_state(true));
        let (status, _) = send(app, json_request("GET", uri, None, "")).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "GET {}", uri);
    }
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> Result<()> {
    let app = app(unreachable_state(true));

    let (status, body) = send(app, json_request("GET", "/games/abc", None, "")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_store() -> Result<()> {
    let app = app(unreachable_state(true));

    let (status, body) = send(app, json_request("GET", "/health", None, "")).await?;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn banner_needs_no_store() -> Result<()> {
    let app = app(unreachable_state(true));

    let (status, body) = send(app, json_request("GET", "/", None, "")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Game Catalog API");
    Ok(())
}
