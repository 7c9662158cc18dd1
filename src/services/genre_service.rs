use sqlx::PgConnection;
use tracing::info;

use crate::database::models::{Genre, GenreInput};
use crate::database::{DatabaseError, Repository};

const GENRES: Repository<Genre> = Repository::new("genres");

pub const GENRE_NOT_FOUND: &str = "Genre not found";

pub struct GenreService<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> GenreService<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(self) -> Result<Vec<Genre>, DatabaseError> {
        GENRES.select_all(self.conn).await
    }

    /// Insert a genre. The generated id is not reported back.
    pub async fn create(self, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO genres (name) VALUES ($1)")
            .bind(name)
            .execute(self.conn)
            .await?;

        info!(name, "created genre");
        Ok(())
    }

    pub async fn update(self, input: &GenreInput) -> Result<Genre, DatabaseError> {
        GENRES.require(&mut *self.conn, input.id, GENRE_NOT_FOUND).await?;

        let updated = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&input.name)
        .bind(input.id)
        .fetch_optional(self.conn)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(GENRE_NOT_FOUND.to_string()))?;

        info!(id = updated.id, "updated genre");
        Ok(updated)
    }

    /// Genres still referenced by games are guarded by the store's foreign
    /// key; that violation surfaces as a plain store error.
    pub async fn delete_by_id(self, id: i32) -> Result<Genre, DatabaseError> {
        let deleted = GENRES.delete_404(self.conn, id).await?;
        info!(id, "deleted genre");
        Ok(deleted)
    }
}
