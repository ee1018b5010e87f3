//! Category repository
//!
//! - seed: single INSERT from UNNEST with ON CONFLICT (idempotent)
//! - list: LEFT JOIN with link count (no N+1)

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::CategoryName;

/// Category with the number of links referencing it
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CategoryWithCount {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub link_count: i64,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert any of `names` that don't exist yet. Returns how many were new.
    ///
    /// `WITH ORDINALITY` keeps id assignment in the order the names were given.
    pub async fn seed(&self, names: &[CategoryName]) -> Result<u64, DbError> {
        if names.is_empty() {
            return Ok(0);
        }

        let names: Vec<String> = names.iter().map(|n| n.as_str().to_owned()).collect();
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name)
            SELECT t.name
            FROM UNNEST($1::TEXT[]) WITH ORDINALITY AS t(name, ord)
            ORDER BY t.ord
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(names)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List all categories, oldest first, with link counts.
    pub async fn list(&self) -> Result<Vec<CategoryWithCount>, DbError> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT
                c.id,
                c.name,
                c.created_at,
                COUNT(l.id) AS link_count
            FROM categories c
            LEFT JOIN links l ON l.category_id = c.id
            GROUP BY c.id, c.name, c.created_at
            ORDER BY c.id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}
