#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use shelf_app::App;
use shelf_kernel::settings::{DatabaseSettings, Settings};
use tower::ServiceExt;

/// Settings pointing at a private in-memory database.
pub fn memory_settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        ..Settings::default()
    }
}

/// A migrated, initialized app over an empty in-memory database.
pub async fn test_app() -> App {
    App::prepare(memory_settings()).await.unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

/// Send one request to `/api/books` and parse the envelope.
pub async fn call(router: &Router, method: Method, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri("/api/books");
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        json,
    }
}

/// Ids of every book currently listed.
pub async fn listed_ids(router: &Router) -> Vec<i64> {
    let response = call(router, Method::GET, None).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect()
}
