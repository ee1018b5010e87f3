//! Storage seam between HTTP handlers and persistence

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CategoryRepo, CategoryWithCount, Link, LinkRepo};
use super::{migrations, DbError};
use crate::models::{CategoryName, LinkFilter, NewLink};

/// Link/category catalog operations.
///
/// Implementations must reject a link whose category does not exist without
/// persisting anything, and must increment visit counts atomically.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All links passing `filter`, ordered by visit count descending then id.
    async fn list_links(&self, filter: &LinkFilter) -> Result<Vec<Link>, DbError>;

    async fn get_link(&self, id: i64) -> Result<Link, DbError>;

    /// Persist a link with a visit count of zero.
    async fn create_link(&self, link: NewLink) -> Result<Link, DbError>;

    async fn delete_link(&self, id: i64) -> Result<(), DbError>;

    /// Add one visit and return the new count.
    async fn record_visit(&self, id: i64) -> Result<i64, DbError>;

    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, DbError>;

    /// Insert the names that are not present yet; returns how many were new.
    async fn seed_categories(&self, names: &[CategoryName]) -> Result<u64, DbError>;
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if missing.
    pub async fn migrate(&self) -> Result<(), DbError> {
        migrations::run(&self.pool).await
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn list_links(&self, filter: &LinkFilter) -> Result<Vec<Link>, DbError> {
        LinkRepo::new(&self.pool).list(filter).await
    }

    async fn get_link(&self, id: i64) -> Result<Link, DbError> {
        LinkRepo::new(&self.pool).get(id).await
    }

    async fn create_link(&self, link: NewLink) -> Result<Link, DbError> {
        LinkRepo::new(&self.pool).create(&link).await
    }

    async fn delete_link(&self, id: i64) -> Result<(), DbError> {
        LinkRepo::new(&self.pool).delete(id).await
    }

    async fn record_visit(&self, id: i64) -> Result<i64, DbError> {
        LinkRepo::new(&self.pool).record_visit(id).await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryWithCount>, DbError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn seed_categories(&self, names: &[CategoryName]) -> Result<u64, DbError> {
        CategoryRepo::new(&self.pool).seed(names).await
    }
}
