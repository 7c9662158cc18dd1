use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use futures::FutureExt;
use serde_json::Value;

use crate::database::models::{Game, Genre, GenreInput};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{GameService, GenreService};
use crate::state::SharedState;

use super::utils::{actor, parse_id};

/// GET /genres/ - list every genre
pub async fn genres_get(State(state): State<SharedState>) -> ApiResult<Vec<Genre>> {
    let genres = state
        .connector
        .run(|conn| GenreService::new(conn).list_all().boxed())
        .await?;
    Ok(ApiResponse::success(genres))
}

/// GET /genres/:genre - games whose genre name matches, ignoring case
pub async fn genre_games_get(
    State(state): State<SharedState>,
    Path(genre_name): Path<String>,
) -> ApiResult<Vec<Game>> {
    let games = state
        .connector
        .run(move |conn| {
            async move { GameService::new(conn).list_by_genre_name(&genre_name).await }.boxed()
        })
        .await?;
    Ok(ApiResponse::success(games))
}

/// POST /genres/ - create a genre
pub async fn genres_post(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<GenreInput>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), name = %input.name, "creating genre");

    state
        .connector
        .run(move |conn| async move { GenreService::new(conn).create(&input.name).await }.boxed())
        .await?;
    Ok(ApiResponse::message("Genre created", StatusCode::CREATED))
}

/// PUT /genres/ - rename the genre named by `id`
pub async fn genres_put(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<GenreInput>, JsonRejection>,
) -> ApiResult<Genre> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), id = input.id, "updating genre");

    let genre = state
        .connector
        .run(move |conn| async move { GenreService::new(conn).update(&input).await }.boxed())
        .await?;
    Ok(ApiResponse::success(genre))
}

/// DELETE /genres/:genre/delete - remove a genre by id
pub async fn genre_delete(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> ApiResult<Genre> {
    let id = parse_id(&id)?;
    tracing::info!(by = actor(&user), id, "deleting genre");

    let genre = state
        .connector
        .run(move |conn| GenreService::new(conn).delete_by_id(id).boxed())
        .await?;
    Ok(ApiResponse::success(genre))
}
