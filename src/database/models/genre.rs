use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Body of `POST /genres/` and `PUT /genres/`. `id` is ignored on create.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreInput {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}
