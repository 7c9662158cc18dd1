use axum::{
    extract::{rejection::FormRejection, State},
    Form,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login/ - issue a bearer token for `username`
///
/// Expected Input (form-encoded): `username=...&password=...`
///
/// Expected Output:
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// The password is accepted but not verified; any non-empty username gets a
/// token.
pub async fn login_post(
    State(state): State<SharedState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Value> {
    let Form(form) = form?;

    let username = form.username.trim();
    if username.is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    tracing::info!(
        username,
        password_supplied = !form.password.is_empty(),
        "issuing token"
    );

    let secret = state.secret.load()?;
    let token = issue_token(username, &secret)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}
