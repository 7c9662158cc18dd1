use axum::Extension;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Parse an `:id` path segment
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("invalid id '{}'", raw)))
}

/// Username for audit logging; write routes are only authenticated when the
/// gate is enabled.
pub fn actor(user: &Option<Extension<AuthUser>>) -> &str {
    user.as_ref()
        .map(|Extension(user)| user.username.as_str())
        .unwrap_or("anonymous")
}
