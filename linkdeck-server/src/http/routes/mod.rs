//! Route handlers organized by resource

pub mod health;
pub mod links;
pub mod categories;
