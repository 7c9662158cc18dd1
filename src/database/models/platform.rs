use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Platform {
    pub id: i32,
    pub name: String,
}

/// Body of `POST /platforms/` and `PUT /platforms/`. `id` is ignored on create.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformInput {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}
