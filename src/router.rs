use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{games, genres, login, platforms, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::SharedState;

/// Build the full router. Trailing slashes follow the public route table
/// exactly: `/games` but `/games/` for updates, `/genres/` and `/platforms/`
/// for collections.
pub fn app(state: SharedState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login/", post(login::login_post))
        .merge(game_routes(&state))
        .merge(genre_routes(&state))
        .merge(platform_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Put the bearer-token gate in front of a write route when enabled
fn guarded(state: &SharedState, route: MethodRouter<SharedState>) -> MethodRouter<SharedState> {
    if state.require_auth {
        route.route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ))
    } else {
        route
    }
}

fn game_routes(state: &SharedState) -> Router<SharedState> {
    Router::new()
        .route(
            "/games",
            get(games::games_get).merge(guarded(state, post(games::games_post))),
        )
        .route("/games/", guarded(state, put(games::games_put)))
        .route("/games/:id", get(games::game_get))
        .route("/games/:id/delete", guarded(state, delete(games::game_delete)))
}

fn genre_routes(state: &SharedState) -> Router<SharedState> {
    Router::new()
        .route(
            "/genres/",
            get(genres::genres_get).merge(guarded(
                state,
                post(genres::genres_post).put(genres::genres_put),
            )),
        )
        // `:genre` is a name here and an id on the delete route; the router
        // needs one parameter name per segment position.
        .route("/genres/:genre", get(genres::genre_games_get))
        .route("/genres/:genre/delete", guarded(state, delete(genres::genre_delete)))
}

fn platform_routes(state: &SharedState) -> Router<SharedState> {
    Router::new()
        .route(
            "/platforms/",
            get(platforms::platforms_get).merge(guarded(
                state,
                post(platforms::platforms_post).put(platforms::platforms_put),
            )),
        )
        .route("/platforms/:id/games", get(platforms::platform_games_get))
        .route(
            "/platforms/:id/delete",
            guarded(state, delete(platforms::platform_delete)),
        )
}
