//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod link;

pub use validation::ValidationError;
pub use category::{CategoryName, CategoryRef};
pub use link::{LinkFilter, NewLink};
