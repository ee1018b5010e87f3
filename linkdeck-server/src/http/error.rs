//! Catalog errors as JSON responses
//!
//! Every failure leaves the API as `{"error": <kind>, "message": <text>}`.
//! Validation failures also name the offending `field`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DbError;
use crate::models::ValidationError;

/// Request failure, mapped to 400 / 404 / 500
#[derive(Debug)]
pub enum ApiError {
    /// Bad or missing input (400)
    Validation(ValidationError),

    /// Link or category absent (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure (500); details are logged, never returned
    Database(DbError),
}

/// Wire shape of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Database(_) => "internal_error",
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, field) = match self {
            Self::Validation(e) => (e.to_string(), Some(e.field())),
            Self::NotFound { resource, id } => (format!("{} '{}' not found", resource, id), None),
            Self::Database(_) => ("an internal error occurred".to_string(), None),
        };
        ErrorBody {
            error: self.kind(),
            message,
            field,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            tracing::error!(error = %e, "catalog store failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
