use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::genre::Genre;

/// A game row. `genre` is only populated by reads that join `genres`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub genre_id: i32,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
}

/// Row shape of `games JOIN genres`
#[derive(Debug, Clone, FromRow)]
pub struct GameWithGenreRow {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub genre_id: i32,
    pub genre_ref_id: i32,
    pub genre_name: String,
}

impl From<GameWithGenreRow> for Game {
    fn from(row: GameWithGenreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            genre_id: row.genre_id,
            genre: Some(Genre {
                id: row.genre_ref_id,
                name: row.genre_name,
            }),
        }
    }
}

/// Body of `POST /games` and `PUT /games/`. `id` is ignored on create.
#[derive(Debug, Clone, Deserialize)]
pub struct GameInput {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub genre_id: i32,
}
