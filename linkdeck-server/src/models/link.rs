//! Link input validation and list filters

use super::category::CategoryRef;
use super::validation::{bounded, required, ValidationError};

const MAX_NAME_LEN: usize = 256;
const MAX_URL_LEN: usize = 2048;
const MAX_DESCRIPTION_LEN: usize = 4096;

/// A validated link ready to be persisted.
///
/// Name, image, url and category are required; description may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    name: String,
    image: String,
    url: String,
    description: String,
    category: CategoryRef,
}

impl NewLink {
    /// Validate raw link fields against an already-resolved category.
    ///
    /// Fields are checked in order (name, image, url, description) and the
    /// first failure is returned.
    pub fn new(
        name: &str,
        image: &str,
        url: &str,
        description: Option<&str>,
        category: CategoryRef,
    ) -> Result<Self, ValidationError> {
        let (name, image, url, description) = validate_fields(name, image, url, description)?;
        Ok(Self {
            name,
            image,
            url,
            description,
            category,
        })
    }

    /// Validate request input, including the optional category id/name pair.
    ///
    /// Text fields are checked before the category reference.
    pub fn parse(
        name: &str,
        image: &str,
        url: &str,
        description: Option<&str>,
        category_id: Option<i64>,
        category_name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let (name, image, url, description) = validate_fields(name, image, url, description)?;
        let category = CategoryRef::from_parts(category_id, category_name)?;
        Ok(Self {
            name,
            image,
            url,
            description,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &CategoryRef {
        &self.category
    }
}

fn validate_fields(
    name: &str,
    image: &str,
    url: &str,
    description: Option<&str>,
) -> Result<(String, String, String, String), ValidationError> {
    Ok((
        required("name", name, MAX_NAME_LEN)?,
        required("image", image, MAX_URL_LEN)?,
        required("url", url, MAX_URL_LEN)?,
        bounded("description", description.unwrap_or_default(), MAX_DESCRIPTION_LEN)?,
    ))
}

/// Optional category restriction for link listings.
///
/// When both parts are set a link must match both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl LinkFilter {
    /// Parse the raw `categoryId` / `category` query values.
    ///
    /// Blank values are treated as absent so `?categoryId=` lists everything.
    pub fn from_query(category_id: Option<&str>, category: Option<&str>) -> Result<Self, ValidationError> {
        let category_id = match category_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
                field: "categoryId",
                reason: "must be an integer",
            })?),
            None => None,
        };

        let category_name = category
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Self {
            category_id,
            category_name,
        })
    }

    /// Filter on a single category id
    pub fn by_category_id(id: i64) -> Self {
        Self {
            category_id: Some(id),
            category_name: None,
        }
    }

    /// Filter on a single category name
    pub fn by_category_name(name: impl Into<String>) -> Self {
        Self {
            category_id: None,
            category_name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.category_name.is_none()
    }

    /// Whether a link in the given category passes this filter.
    pub fn matches(&self, category_id: i64, category_name: &str) -> bool {
        self.category_id.map_or(true, |id| id == category_id)
            && self
                .category_name
                .as_deref()
                .map_or(true, |name| name == category_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryName;

    fn tools() -> CategoryRef {
        CategoryRef::Name(CategoryName::new("Tools").unwrap())
    }

    #[test]
    fn accepts_complete_link() {
        let link = NewLink::new(
            " ripgrep ",
            "https://example.com/rg.png",
            "https://github.com/BurntSushi/ripgrep",
            None,
            tools(),
        )
        .unwrap();

        assert_eq!(link.name(), "ripgrep");
        assert_eq!(link.description(), "");
        assert_eq!(link.category(), &tools());
    }

    #[test]
    fn reports_first_missing_field() {
        let err = NewLink::new("", "", "", None, tools()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });

        let err = NewLink::new("rg", "img.png", "  ", None, tools()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "url" });
    }

    #[test]
    fn parse_checks_fields_before_category() {
        let err = NewLink::parse("", "img.png", "https://x", None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });

        let err = NewLink::parse("rg", "img.png", "https://x", None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category" });

        let link = NewLink::parse("rg", "img.png", "https://x", Some(" fast grep "), Some(4), None)
            .unwrap();
        assert_eq!(link.category(), &CategoryRef::Id(4));
        assert_eq!(link.description(), "fast grep");
    }

    #[test]
    fn rejects_long_description() {
        let long = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        let err = NewLink::new("rg", "img.png", "https://x", Some(&long), tools()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "description", .. }));
    }

    #[test]
    fn filter_from_query() {
        let f = LinkFilter::from_query(Some("7"), None).unwrap();
        assert_eq!(f, LinkFilter::by_category_id(7));

        let f = LinkFilter::from_query(Some(""), Some("  ")).unwrap();
        assert!(f.is_empty());

        let err = LinkFilter::from_query(Some("seven"), None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "categoryId", .. }));
    }

    #[test]
    fn filter_matches() {
        let all = LinkFilter::default();
        assert!(all.matches(1, "Tools"));

        let by_id = LinkFilter::by_category_id(2);
        assert!(by_id.matches(2, "Design"));
        assert!(!by_id.matches(1, "Tools"));

        let by_name = LinkFilter::by_category_name("Tools");
        assert!(by_name.matches(1, "Tools"));
        assert!(!by_name.matches(1, "tools"));

        let both = LinkFilter {
            category_id: Some(1),
            category_name: Some("Design".into()),
        };
        assert!(!both.matches(1, "Tools"));
    }
}
