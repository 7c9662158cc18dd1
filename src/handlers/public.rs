use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::SharedState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Game Catalog API",
        "version": version,
        "endpoints": {
            "games": "/games[?name=], /games/:id, /games/, /games/:id/delete",
            "genres": "/genres/, /genres/:genre, /genres/:id/delete",
            "platforms": "/platforms/, /platforms/:id/games, /platforms/:id/delete",
            "login": "/login/ (form: username, password)",
            "health": "/health",
        }
    }))
}

/// GET /health - open, ping and close one store connection
pub async fn health(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now();

    match state.connector.health_check().await {
        Ok(()) => Ok(Json(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
