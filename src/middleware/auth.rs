use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{bearer_token, validate_token, AuthError, Claims};
use crate::error::ApiError;
use crate::state::SharedState;

/// Caller identity recovered from a validated bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
        }
    }
}

/// Bearer-token gate. Rejects the single request with 401 on a missing or
/// malformed header or a bad token; on success injects [`AuthUser`].
pub async fn jwt_auth_middleware(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()?;

    let token = bearer_token(header)?;
    let secret = state.secret.load()?;
    let claims = validate_token(token, &secret)?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!(user = %auth_user.username, "bearer token accepted");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
