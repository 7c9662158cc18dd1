use sqlx::PgConnection;
use tracing::info;

use crate::database::models::{Platform, PlatformInput};
use crate::database::{DatabaseError, Repository};

const PLATFORMS: Repository<Platform> = Repository::new("platforms");

pub const PLATFORM_NOT_FOUND: &str = "Platform not found";

pub struct PlatformService<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PlatformService<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(self) -> Result<Vec<Platform>, DatabaseError> {
        PLATFORMS.select_all(self.conn).await
    }

    pub async fn create(self, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO platforms (name) VALUES ($1)")
            .bind(name)
            .execute(self.conn)
            .await?;

        info!(name, "created platform");
        Ok(())
    }

    pub async fn update(self, input: &PlatformInput) -> Result<Platform, DatabaseError> {
        PLATFORMS.require(&mut *self.conn, input.id, PLATFORM_NOT_FOUND).await?;

        let updated = sqlx::query_as::<_, Platform>(
            "UPDATE platforms SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&input.name)
        .bind(input.id)
        .fetch_optional(self.conn)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(PLATFORM_NOT_FOUND.to_string()))?;

        info!(id = updated.id, "updated platform");
        Ok(updated)
    }

    pub async fn delete_by_id(self, id: i32) -> Result<Platform, DatabaseError> {
        let deleted = PLATFORMS.delete_404(self.conn, id).await?;
        info!(id, "deleted platform");
        Ok(deleted)
    }
}
