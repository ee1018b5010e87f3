//! linkdeck-server: bookmark catalog over HTTP
//!
//! Links carry display metadata, belong to exactly one seeded category, and
//! count their visits. The crate is split into:
//! - [`models`]: validated input types
//! - [`db`]: the [`db::CatalogStore`] seam with Postgres and in-memory stores
//! - [`http`]: axum routes, extractors, and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{CatalogStore, DbError, MemoryCatalog, PgCatalog};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
