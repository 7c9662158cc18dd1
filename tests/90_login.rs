mod common;

use anyhow::Result;
use axum::{body::Body, http::Request, http::StatusCode};

use common::{json_request, send, unreachable_state, TEST_SECRET};
use game_catalog_api::auth::{validate_token, SecretSource};
use game_catalog_api::{app, AppState};

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn login_issues_token_that_passes_the_gate() -> Result<()> {
    let state = unreachable_state(true);

    let (status, body) = send(
        app(state.clone()),
        form_request("username=mario&password=whatever"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().expect("token in body").to_string();
    let claims = validate_token(&token, TEST_SECRET)?;
    assert_eq!(claims.sub, "mario");

    // The gate lets the request through; the unreachable store then fails it
    let (status, _) = send(
        app(state),
        json_request("POST", "/genres/", Some(&token), r#"{"name":"Puzzle"}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn password_is_optional() -> Result<()> {
    let (status, body) = send(app(unreachable_state(true)), form_request("username=luigi")).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    Ok(())
}

#[tokio::test]
async fn missing_username_is_bad_request() -> Result<()> {
    let (status, body) = send(app(unreachable_state(true)), form_request("password=x")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn blank_username_is_bad_request() -> Result<()> {
    let (status, body) =
        send(app(unreachable_state(true)), form_request("username=%20%20&password=x")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn unset_secret_variable_is_server_error() -> Result<()> {
    let base = unreachable_state(true);
    let state = AppState::new(
        base.connector.clone(),
        SecretSource::Env("GAME_CATALOG_TEST_SECRET_NEVER_SET".to_string()),
        true,
    );

    let (status, body) = send(app(state), form_request("username=mario")).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
    Ok(())
}
