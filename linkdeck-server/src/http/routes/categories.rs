//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::CategoryWithCount;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Category response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub link_count: i64,
}

impl From<CategoryWithCount> for CategoryResponse {
    fn from(c: CategoryWithCount) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at.to_rfc3339(),
            link_count: c.link_count,
        }
    }
}

/// GET /categories - list all categories with link counts
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/categories", get(list_categories))
}
