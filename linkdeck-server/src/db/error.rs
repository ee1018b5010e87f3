/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn link_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "link",
            id: id.to_string(),
        }
    }

    pub fn category_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "category",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
