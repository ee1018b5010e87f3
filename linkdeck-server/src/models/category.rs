//! Category name validation and link-to-category references

use std::fmt;

use super::validation::{required, ValidationError};

/// Maximum length for category names
const MAX_CATEGORY_NAME_LEN: usize = 64;

/// Validated category name (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a new category name.
    ///
    /// Surrounding whitespace is trimmed. Names are case-sensitive, so
    /// `Tools` and `tools` are different categories.
    ///
    /// # Example
    /// ```
    /// use linkdeck_server::models::CategoryName;
    ///
    /// assert_eq!(CategoryName::new("  Tools ").unwrap().as_str(), "Tools");
    /// assert!(CategoryName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required("category", s, MAX_CATEGORY_NAME_LEN).map(Self)
    }

    /// Get the category name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a new link names its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Id(i64),
    Name(CategoryName),
}

impl CategoryRef {
    /// Build a reference from the optional request fields.
    ///
    /// The id wins when both are supplied. Neither is an `Empty` error on
    /// `category`.
    pub fn from_parts(id: Option<i64>, name: Option<&str>) -> Result<Self, ValidationError> {
        match (id, name) {
            (Some(id), _) if id <= 0 => Err(ValidationError::InvalidFormat {
                field: "categoryId",
                reason: "must be a positive integer",
            }),
            (Some(id), _) => Ok(Self::Id(id)),
            (None, Some(name)) => CategoryName::new(name).map(Self::Name),
            (None, None) => Err(ValidationError::Empty { field: "category" }),
        }
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name.as_str()),
        }
    }
}
