use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use futures::FutureExt;
use serde::Deserialize;

use crate::database::models::{Game, GameInput};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::GameService;
use crate::state::SharedState;

use super::utils::{actor, parse_id};

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub name: Option<String>,
}

/// GET /games[?name=] - list every game, or the first game whose name
/// contains `name` (case-insensitive)
pub async fn games_get(
    State(state): State<SharedState>,
    Query(query): Query<GamesQuery>,
) -> Result<Response, ApiError> {
    match query.name.filter(|name| !name.is_empty()) {
        Some(name) => {
            let game = state
                .connector
                .run(move |conn| {
                    async move { GameService::new(conn).search_by_name(&name).await }.boxed()
                })
                .await?;
            Ok(Json(game).into_response())
        }
        None => {
            let games = state
                .connector
                .run(|conn| GameService::new(conn).list_all().boxed())
                .await?;
            Ok(Json(games).into_response())
        }
    }
}

/// GET /games/:id - show a single game with its genre
pub async fn game_get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Game> {
    let id = parse_id(&id)?;
    let game = state
        .connector
        .run(move |conn| GameService::new(conn).get_by_id(id).boxed())
        .await?;
    Ok(ApiResponse::success(game))
}

/// POST /games - create a game, answering with the stored row
pub async fn games_post(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<GameInput>, JsonRejection>,
) -> ApiResult<Game> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), name = %input.name, "creating game");

    let insert = input.clone();
    let id = state
        .connector
        .run(move |conn| async move { GameService::new(conn).create(&insert).await }.boxed())
        .await?;

    Ok(ApiResponse::created(Game {
        id,
        name: input.name,
        price: input.price,
        genre_id: input.genre_id,
        genre: None,
    }))
}

/// PUT /games/ - overwrite name, price and genre of the game named by `id`
pub async fn games_put(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<GameInput>, JsonRejection>,
) -> ApiResult<Game> {
    let Json(input) = payload?;
    tracing::info!(by = actor(&user), id = input.id, "updating game");

    let game = state
        .connector
        .run(move |conn| async move { GameService::new(conn).update(&input).await }.boxed())
        .await?;
    Ok(ApiResponse::success(game))
}

/// DELETE /games/:id/delete - remove a game, answering with the removed row
pub async fn game_delete(
    State(state): State<SharedState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> ApiResult<Game> {
    let id = parse_id(&id)?;
    tracing::info!(by = actor(&user), id, "deleting game");

    let game = state
        .connector
        .run(move |conn| GameService::new(conn).delete_by_id(id).boxed())
        .await?;
    Ok(ApiResponse::success(game))
}
