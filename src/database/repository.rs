use std::marker::PhantomData;

use sqlx::{postgres::PgRow, FromRow, PgConnection};

use crate::database::connector::DatabaseError;

pub const OBJECT_NOT_FOUND: &str = "Object not found";

/// Table-level statements shared by every entity: full listing, existence
/// checks and check-then-delete. `table_name` is always a compile-time
/// constant, never caller input.
pub struct Repository<T> {
    table_name: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> Repository<T> {
    pub const fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            _phantom: PhantomData,
        }
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub async fn select_all(&self, conn: &mut PgConnection) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {}", self.table_name);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(conn).await?;
        Ok(rows)
    }

    pub async fn exists(&self, conn: &mut PgConnection, id: i32) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT id FROM {} WHERE id = $1", self.table_name);
        let row: Option<(i32,)> = sqlx::query_as(&sql).bind(id).fetch_optional(conn).await?;
        Ok(row.is_some())
    }

    /// Fails with `NotFound(message)` when no row has this id
    pub async fn require(
        &self,
        conn: &mut PgConnection,
        id: i32,
        message: &str,
    ) -> Result<(), DatabaseError> {
        if self.exists(conn, id).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(message.to_string()))
        }
    }

    /// Delete by id and return the removed row
    pub async fn delete_404(&self, conn: &mut PgConnection, id: i32) -> Result<T, DatabaseError> {
        self.require(&mut *conn, id, OBJECT_NOT_FOUND).await?;

        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING *", self.table_name);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?
            // Removed by a concurrent request between the check and the delete
            .ok_or_else(|| DatabaseError::NotFound(OBJECT_NOT_FOUND.to_string()))
    }
}
