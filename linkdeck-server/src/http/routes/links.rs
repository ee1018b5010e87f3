//! Link endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::Link;
use crate::http::error::ApiError;
use crate::http::extractors::{LinkId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{LinkFilter, NewLink};

/// Query string for `GET /links`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksParams {
    pub category_id: Option<String>,
    pub category: Option<String>,
}

/// Create link request
///
/// Missing or null strings reach validation as empty so it can name the field.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category: Option<String>,
}

/// Link response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub url: String,
    pub description: String,
    pub category_id: i64,
    pub category: String,
    pub visit_count: i64,
    pub created_at: String,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            name: l.name,
            image: l.image,
            url: l.url,
            description: l.description,
            category_id: l.category_id,
            category: l.category_name,
            visit_count: l.visit_count,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub message: &'static str,
    pub link: LinkResponse,
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub message: &'static str,
    pub id: i64,
    pub visit_count: i64,
}

/// GET /links - list links, most visited first
async fn list_links(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListLinksParams>,
) -> Result<Json<Vec<LinkResponse>>, ApiError> {
    let filter = LinkFilter::from_query(params.category_id.as_deref(), params.category.as_deref())?;
    let links = state.store.list_links(&filter).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// GET /links/{id} - get a single link
async fn get_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<Json<LinkResponse>, ApiError> {
    let link = state.store.get_link(id).await?;
    Ok(Json(LinkResponse::from(link)))
}

/// POST /links - create a link in an existing category
async fn create_link(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateLinkRequest>,
) -> Result<Json<CreateLinkResponse>, ApiError> {
    let link = NewLink::parse(
        req.name.as_deref().unwrap_or_default(),
        req.image.as_deref().unwrap_or_default(),
        req.url.as_deref().unwrap_or_default(),
        req.description.as_deref(),
        req.category_id,
        req.category.as_deref(),
    )?;

    let link = state.store.create_link(link).await?;
    tracing::info!(link_id = link.id, category = %link.category_name, "link created");

    Ok(Json(CreateLinkResponse {
        message: "link added successfully",
        link: LinkResponse::from(link),
    }))
}

/// DELETE /links/{id} - remove a link
async fn delete_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<Json<DeleteLinkResponse>, ApiError> {
    state.store.delete_link(id).await?;
    tracing::info!(link_id = id, "link deleted");

    Ok(Json(DeleteLinkResponse {
        message: "link deleted successfully",
        id,
    }))
}

/// POST /links/{id}/visit - count one visit
async fn record_visit(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<Json<VisitResponse>, ApiError> {
    let visit_count = state.store.record_visit(id).await?;
    tracing::debug!(link_id = id, visit_count, "visit recorded");

    Ok(Json(VisitResponse {
        message: "visit recorded",
        id,
        visit_count,
    }))
}

/// Link routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route("/links/{id}", get(get_link).delete(delete_link))
        .route("/links/{id}/visit", post(record_visit))
}
