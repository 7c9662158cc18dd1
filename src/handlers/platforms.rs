use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use futures::FutureExt;
use serde_json::Value;

use crate::database::models::{Game, Platform, PlatformInput};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{GameService, PlatformService};
use crate::state::SharedState;

use super::utils::{actor, parse_id};

/// GET /platforms/ - list every platform
pub async fn platforms_get(State(state): State<SharedState>) -> ApiResult<Vec<Platform>> {
    let platforms = state
        .connector
        .run(|conn| PlatformService::new(conn).list_all().boxed())
        .await?;
    Ok(ApiResponse::success(platforms))
}

/// GET /platforms/:id/games - games available on a platform
pub async fn platform_games_get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Game>> {
    let id = parse_id(&id)?;
    let games = state
        .connector
        .run(move |conn| GameService::new(conn).list_by_platform_id(id).boxed())
        .await?;
    Ok(ApiResponse::success(games))
}

/// POST /platforms/ - create a platform
pub async fn platforms_post(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<PlatformInput>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), name = %input.name, "creating platform");

    state
        .connector
        .run(move |conn| {
            async move { PlatformService::new(conn).create(&input.name).await }.boxed()
        })
        .await?;
    Ok(ApiResponse::message(
        "Successfully created new platform data.",
        StatusCode::CREATED,
    ))
}

/// PUT /platforms/ - rename the platform named by `id`
pub async fn platforms_put(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<PlatformInput>, JsonRejection>,
) -> ApiResult<Platform> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), id = input.id, "updating platform");

    let platform = state
        .connector
        .run(move |conn| async move { PlatformService::new(conn).update(&input).await }.boxed())
        .await?;
    Ok(ApiResponse::success(platform))
}

/// DELETE /platforms/:id/delete - remove a platform by id
pub async fn platform_delete(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> ApiResult<Platform> {
    let id = parse_id(&id)?;
    tracing::info!(by = actor(&user), id, "deleting platform");

    let platform = state
        .connector
        .run(move |conn| PlatformService::new(conn).delete_by_id(id).boxed())
        .await?;
    Ok(ApiResponse::success(platform))
}
