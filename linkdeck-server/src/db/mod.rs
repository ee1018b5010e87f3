//! Database layer - connection pool, schema, and catalog stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - A link's category is resolved inside the INSERT - no check-then-insert
//! - Counters are updated in place - no read-modify-write

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::DbError;
pub use memory::MemoryCatalog;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use store::{CatalogStore, PgCatalog};
