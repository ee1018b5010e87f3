pub mod config;
pub mod error;

pub use config::{CatalogConfig, DatabaseConfig, LinkdeckConfig, ServerSection, DEFAULT_CATEGORIES};
pub use error::{LinkdeckError, Result};
