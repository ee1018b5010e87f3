//! Schema setup for the catalog tables
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::PgPool;

use super::DbError;

/// Create the categories and links tables plus their indexes
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // ON DELETE RESTRICT: a category with links can never disappear
    // underneath them.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT NOT NULL,
            url TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
            visit_count BIGINT NOT NULL DEFAULT 0 CHECK (visit_count >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_links_category ON links(category_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_links_popularity ON links(visit_count DESC, id ASC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
