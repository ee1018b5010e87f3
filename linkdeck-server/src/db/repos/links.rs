//! Link repository
//!
//! Every operation is one statement:
//! - create: INSERT ... SELECT from categories, so a missing category inserts nothing
//! - visit: UPDATE ... SET visit_count = visit_count + 1 RETURNING
//! - list/get: JOIN categories for the category name

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{CategoryRef, LinkFilter, NewLink};

/// Link record joined with its category name
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub url: String,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Link repository
pub struct LinkRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LinkRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List links, most visited first.
    ///
    /// NULL parameters disable the corresponding half of the filter.
    pub async fn list(&self, filter: &LinkFilter) -> Result<Vec<Link>, DbError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT
                l.id,
                l.name,
                l.image,
                l.url,
                l.description,
                l.category_id,
                c.name AS category_name,
                l.visit_count,
                l.created_at
            FROM links l
            JOIN categories c ON c.id = l.category_id
            WHERE ($1::BIGINT IS NULL OR l.category_id = $1)
              AND ($2::TEXT IS NULL OR c.name = $2)
            ORDER BY l.visit_count DESC, l.id ASC
            "#,
        )
        .bind(filter.category_id)
        .bind(filter.category_name.as_deref())
        .fetch_all(self.pool)
        .await?;

        Ok(links)
    }

    /// Get a single link by id.
    pub async fn get(&self, id: i64) -> Result<Link, DbError> {
        sqlx::query_as::<_, Link>(
            r#"
            SELECT
                l.id,
                l.name,
                l.image,
                l.url,
                l.description,
                l.category_id,
                c.name AS category_name,
                l.visit_count,
                l.created_at
            FROM links l
            JOIN categories c ON c.id = l.category_id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::link_not_found(id))
    }

    /// Create a link in an existing category.
    ///
    /// The category lookup and the insert are the same statement: when no
    /// category row matches, the SELECT feeds zero rows into the INSERT and
    /// the result is NotFound. There is no window between check and use.
    pub async fn create(&self, link: &NewLink) -> Result<Link, DbError> {
        let (category_id, category_name) = match link.category() {
            CategoryRef::Id(id) => (Some(*id), None),
            CategoryRef::Name(name) => (None, Some(name.as_str())),
        };

        sqlx::query_as::<_, Link>(
            r#"
            WITH inserted AS (
                INSERT INTO links (name, image, url, description, category_id)
                SELECT $1, $2, $3, $4, c.id
                FROM categories c
                WHERE c.id = $5 OR c.name = $6
                RETURNING id, name, image, url, description, category_id, visit_count, created_at
            )
            SELECT
                i.id,
                i.name,
                i.image,
                i.url,
                i.description,
                i.category_id,
                c.name AS category_name,
                i.visit_count,
                i.created_at
            FROM inserted i
            JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(link.name())
        .bind(link.image())
        .bind(link.url())
        .bind(link.description())
        .bind(category_id)
        .bind(category_name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::category_not_found(link.category()))
    }

    /// Delete a link by id.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::link_not_found(id));
        }
        Ok(())
    }

    /// Increment the visit counter by one, returning the new count.
    pub async fn record_visit(&self, id: i64) -> Result<i64, DbError> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE links SET visit_count = visit_count + 1 WHERE id = $1 RETURNING visit_count",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::link_not_found(id))
    }
}
