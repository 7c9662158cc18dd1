use sqlx::PgConnection;
use tracing::{debug, info};

use crate::database::models::{Game, GameInput, GameWithGenreRow};
use crate::database::{DatabaseError, Repository, OBJECT_NOT_FOUND};

const GAMES: Repository<Game> = Repository::new("games");

pub const GAME_NOT_FOUND: &str = "Game not found";

const SELECT_ALL_WITH_GENRE: &str = r#"
    SELECT g.id, g.name, g.price, g.genre_id, gr.id AS genre_ref_id, gr.name AS genre_name
    FROM games g
    JOIN genres gr ON g.genre_id = gr.id
"#;

const SELECT_BY_GENRE_NAME: &str = r#"
    SELECT g.id, g.name, g.price, g.genre_id, gr.id AS genre_ref_id, gr.name AS genre_name
    FROM games g
    JOIN genres gr ON g.genre_id = gr.id
    WHERE LOWER(gr.name) = LOWER($1)
"#;

const SELECT_BY_PLATFORM_ID: &str = r#"
    SELECT g.id, g.name, g.price, g.genre_id, gr.id AS genre_ref_id, gr.name AS genre_name
    FROM games_platforms gp
    JOIN games g ON gp.game_id = g.id
    JOIN platforms p ON gp.platform_id = p.id
    JOIN genres gr ON g.genre_id = gr.id
    WHERE gp.platform_id = $1
"#;

const SEARCH_BY_NAME: &str = r#"
    SELECT id, name, price, genre_id
    FROM games
    WHERE LOWER(name) LIKE '%' || LOWER($1) || '%'
    LIMIT 1
"#;

/// Game statements bound to a single connection for one logical operation.
///
/// Enriched reads inner-join `genres`, so a game whose genre reference does
/// not resolve never shows up in them.
pub struct GameService<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> GameService<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Every game with its genre, in store order
    pub async fn list_all(self) -> Result<Vec<Game>, DatabaseError> {
        let rows = sqlx::query_as::<_, GameWithGenreRow>(SELECT_ALL_WITH_GENRE)
            .fetch_all(self.conn)
            .await?;

        Ok(rows.into_iter().map(Game::from).collect())
    }

    /// First game in the enriched listing whose id matches
    pub async fn get_by_id(self, id: i32) -> Result<Game, DatabaseError> {
        self.list_all()
            .await?
            .into_iter()
            .find(|game| game.id == id)
            .ok_or_else(|| DatabaseError::NotFound(OBJECT_NOT_FOUND.to_string()))
    }

    /// Case-insensitive substring match on the name. Only the first row the
    /// store yields is returned, even when several games match.
    pub async fn search_by_name(self, text: &str) -> Result<Game, DatabaseError> {
        debug!(query = text, "searching games by name");

        sqlx::query_as::<_, Game>(SEARCH_BY_NAME)
            .bind(text)
            .fetch_optional(self.conn)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(OBJECT_NOT_FOUND.to_string()))
    }

    /// Insert and return the generated id
    pub async fn create(self, input: &GameInput) -> Result<i32, DatabaseError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO games (name, price, genre_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.genre_id)
        .fetch_one(self.conn)
        .await?;

        info!(id, name = %input.name, "created game");
        Ok(id)
    }

    /// Overwrite name, price and genre of an existing game
    pub async fn update(self, input: &GameInput) -> Result<Game, DatabaseError> {
        GAMES.require(&mut *self.conn, input.id, GAME_NOT_FOUND).await?;

        let updated = sqlx::query_as::<_, Game>(
            r#"
            UPDATE games SET name = $1, price = $2, genre_id = $3
            WHERE id = $4
            RETURNING id, name, price, genre_id
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.genre_id)
        .bind(input.id)
        .fetch_optional(self.conn)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(GAME_NOT_FOUND.to_string()))?;

        info!(id = updated.id, "updated game");
        Ok(updated)
    }

    pub async fn delete_by_id(self, id: i32) -> Result<Game, DatabaseError> {
        let deleted = GAMES.delete_404(self.conn, id).await?;
        info!(id, "deleted game");
        Ok(deleted)
    }

    /// Games whose genre name equals `name`, ignoring case
    pub async fn list_by_genre_name(self, name: &str) -> Result<Vec<Game>, DatabaseError> {
        let rows = sqlx::query_as::<_, GameWithGenreRow>(SELECT_BY_GENRE_NAME)
            .bind(name)
            .fetch_all(self.conn)
            .await?;

        Ok(rows.into_iter().map(Game::from).collect())
    }

    /// Games linked to a platform. An unknown platform id yields an empty list.
    pub async fn list_by_platform_id(self, platform_id: i32) -> Result<Vec<Game>, DatabaseError> {
        let rows = sqlx::query_as::<_, GameWithGenreRow>(SELECT_BY_PLATFORM_ID)
            .bind(platform_id)
            .fetch_all(self.conn)
            .await?;

        Ok(rows.into_iter().map(Game::from).collect())
    }
}
