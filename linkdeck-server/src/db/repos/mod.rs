//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - One statement per operation, so no multi-step transactions

pub mod categories;
pub mod links;

pub use categories::{CategoryRepo, CategoryWithCount};
pub use links::{Link, LinkRepo};
