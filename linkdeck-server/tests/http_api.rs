//! End-to-end API behavior against the in-memory catalog

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use linkdeck_core::LinkdeckConfig;
use linkdeck_server::models::CategoryName;
use linkdeck_server::{build_router, AppState, CatalogStore, MemoryCatalog};

const SEEDED: &[&str] = &["Development", "Design", "Tools"];

async fn app() -> Router {
    app_seeded(SEEDED).await
}

async fn app_seeded<S: AsRef<str>>(seeds: &[S]) -> Router {
    let store = MemoryCatalog::new();
    let names: Vec<CategoryName> = seeds
        .iter()
        .map(|n| CategoryName::new(n.as_ref()).unwrap())
        .collect();
    store.seed_categories(&names).await.unwrap();

    build_router(Arc::new(AppState::new(Arc::new(store))), false)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, category: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/links",
        Some(json!({
            "name": name,
            "image": format!("https://img.example/{name}.png"),
            "url": format!("https://{name}.example"),
            "category": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["link"].clone()
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["categories"], SEEDED.len());
}

#[tokio::test]
async fn default_categories_are_listed_after_startup() {
    let defaults = LinkdeckConfig::default().catalog.seed_names();
    let app = app_seeded(&defaults).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    for name in linkdeck_core::DEFAULT_CATEGORIES {
        assert!(listed.contains(name), "{name} missing from {listed:?}");
    }
}

#[tokio::test]
async fn categories_include_seeded_defaults() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, SEEDED);
    assert_eq!(body[0]["linkCount"], 0);
}

#[tokio::test]
async fn created_link_is_listed() {
    let app = app().await;
    let link = create(&app, "crates", "Development").await;
    assert_eq!(link["visitCount"], 0);
    assert_eq!(link["category"], "Development");
    assert_eq!(link["description"], "");

    let (status, list) = send(&app, Method::GET, "/api/v1/links", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec![link["id"].as_i64().unwrap()]);
    assert_eq!(list[0]["url"], "https://crates.example");

    let (_, categories) = send(&app, Method::GET, "/api/v1/categories", None).await;
    assert_eq!(categories[0]["linkCount"], 1);
}

#[tokio::test]
async fn create_by_category_id() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/links",
        Some(json!({
            "name": "figma",
            "image": "/static/figma.png",
            "url": "https://figma.com",
            "description": "design tool",
            "categoryId": 2,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "link added successfully");
    assert_eq!(body["link"]["categoryId"], 2);
    assert_eq!(body["link"]["category"], "Design");
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = app().await;

    for reference in [json!({"category": "Music"}), json!({"categoryId": 99})] {
        let mut body = json!({"name": "synth", "image": "i.png", "url": "https://synth.example"});
        body.as_object_mut()
            .unwrap()
            .extend(reference.as_object().unwrap().clone());

        let (status, err) = send(&app, Method::POST, "/api/v1/links", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "not_found");
    }

    let (_, list) = send(&app, Method::GET, "/api/v1/links", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_field_is_400() {
    let app = app().await;
    let cases = [
        (json!({"image": "i", "url": "u", "category": "Tools"}), "name cannot be empty"),
        (json!({"name": "n", "url": "u", "category": "Tools"}), "image cannot be empty"),
        (json!({"name": "n", "image": "i", "url": " ", "category": "Tools"}), "url cannot be empty"),
        (json!({"name": "n", "image": "i", "url": "u"}), "category cannot be empty"),
    ];

    for (body, message) in cases {
        let (status, err) = send(&app, Method::POST, "/api/v1/links", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "validation_error");
        assert_eq!(err["message"], message);
        assert!(message.starts_with(err["field"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn malformed_body_is_400_json() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/links")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let err: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["error"], "validation_error");
}

#[tokio::test]
async fn visit_increments_by_exactly_one() {
    let app = app().await;
    let id = create(&app, "docs", "Tools").await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/links/{id}/visit");

    for expected in 1..=3i64 {
        let (status, body) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["visitCount"], expected);
    }

    let (_, link) = send(&app, Method::GET, &format!("/api/v1/links/{id}"), None).await;
    assert_eq!(link["visitCount"], 3);
}

#[tokio::test]
async fn visit_unknown_link_is_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/v1/links/4242/visit", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "link '4242' not found");
}

#[tokio::test]
async fn delete_removes_link() {
    let app = app().await;
    let keep = create(&app, "keep", "Tools").await["id"].as_i64().unwrap();
    let gone = create(&app, "gone", "Tools").await["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/links/{gone}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], gone);

    let (_, list) = send(&app, Method::GET, "/api/v1/links", None).await;
    assert_eq!(ids(&list), vec![keep]);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/links/{gone}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filter_returns_only_matching_category() {
    let app = app().await;
    let rust = create(&app, "rust", "Development").await["id"].as_i64().unwrap();
    create(&app, "dribbble", "Design").await;
    let go = create(&app, "go", "Development").await["id"].as_i64().unwrap();

    let (status, by_id) = send(&app, Method::GET, "/api/v1/links?categoryId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&by_id), vec![rust, go]);
    assert!(by_id
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["categoryId"] == 1));

    let (_, by_name) = send(&app, Method::GET, "/api/v1/links?category=Development", None).await;
    assert_eq!(ids(&by_name), vec![rust, go]);

    let (_, none) = send(&app, Method::GET, "/api/v1/links?categoryId=3", None).await;
    assert!(none.as_array().unwrap().is_empty());

    let (_, all) = send(&app, Method::GET, "/api/v1/links?categoryId=", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_ids_are_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/links?categoryId=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = send(&app, Method::POST, "/api/v1/links/abc/visit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/links/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn links_sorted_by_visits() {
    let app = app().await;
    let a = create(&app, "a", "Tools").await["id"].as_i64().unwrap();
    let b = create(&app, "b", "Tools").await["id"].as_i64().unwrap();

    send(&app, Method::POST, &format!("/api/v1/links/{b}/visit"), None).await;

    let (_, list) = send(&app, Method::GET, "/api/v1/links", None).await;
    assert_eq!(ids(&list), vec![b, a]);
}

#[tokio::test]
async fn undecodable_query_is_400_json() {
    let app = app().await;
    for uri in [
        "/api/v1/links?category=Tools&category=Design",
        "/api/v1/links?categoryId=1&categoryId=2",
    ] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let err: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err["error"], "validation_error");
        assert_eq!(err["field"], "query");
        assert!(err["message"].as_str().unwrap().contains("duplicate field"));
    }
}

#[tokio::test]
async fn null_required_field_names_the_field() {
    let app = app().await;
    let body = json!({"name": null, "image": "i.png", "url": "https://x.example", "category": "Tools"});

    let (status, err) = send(&app, Method::POST, "/api/v1/links", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "name");
    assert_eq!(err["message"], "name cannot be empty");
}

#[tokio::test]
async fn mistyped_field_reports_decoder_detail() {
    let app = app().await;
    let body = json!({"name": "n", "image": "i.png", "url": "https://x.example", "categoryId": "1"});

    let (status, err) = send(&app, Method::POST, "/api/v1/links", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "body");

    let message = err["message"].as_str().unwrap();
    assert!(message.contains("categoryId"), "{message}");
    assert!(!message.contains("expected a JSON object"));
}
