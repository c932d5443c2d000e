mod common;

use axum::http::{header::ALLOW, Method, StatusCode};
use serde_json::json;

use common::{call, listed_ids, test_app};

#[tokio::test]
async fn created_book_is_listed_with_its_fields() {
    let app = test_app().await;
    let router = app.router();

    let created = call(
        &router,
        Method::POST,
        Some(json!({"title": "Emma", "author": "Austen", "genre": "classic"})),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json["success"], true);
    let id = created.json["data"]["id"].as_i64().unwrap();

    let listed = call(&router, Method::GET, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(
        listed.json["data"],
        json!([{"id": id, "title": "Emma", "author": "Austen", "genre": "classic"}])
    );
}

#[tokio::test]
async fn create_with_missing_or_empty_field_is_rejected() {
    let app = test_app().await;
    let router = app.router();

    for body in [
        json!({"title": "Emma", "author": "Austen"}),
        json!({"title": "", "author": "Austen", "genre": "classic"}),
        json!({"title": "Emma", "author": null, "genre": "classic"}),
        json!({}),
    ] {
        let response = call(&router, Method::POST, Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json["success"], false);
        assert_eq!(
            response.json["error"],
            "Title, author and genre are required fields"
        );
    }

    assert!(listed_ids(&router).await.is_empty());
}

#[tokio::test]
async fn update_applies_only_non_empty_fields() {
    let app = test_app().await;
    let router = app.router();
    let created = call(
        &router,
        Method::POST,
        Some(json!({"title": "Emma", "author": "Austen", "genre": "classic"})),
    )
    .await;
    let id = created.json["data"]["id"].as_i64().unwrap();

    let title_only = call(
        &router,
        Method::PUT,
        Some(json!({"id": id, "title": "Persuasion"})),
    )
    .await;
    assert_eq!(title_only.status, StatusCode::OK);
    assert_eq!(title_only.json["message"], "Book updated successfully");

    let empty_author = call(
        &router,
        Method::PUT,
        Some(json!({"id": id.to_string(), "author": ""})),
    )
    .await;
    assert_eq!(empty_author.status, StatusCode::OK);
    assert_eq!(
        empty_author.json["data"],
        json!({"id": id, "title": "Persuasion", "author": "Austen", "genre": "classic"})
    );
}

#[tokio::test]
async fn update_and_delete_require_an_existing_id() {
    let app = test_app().await;
    let router = app.router();

    let no_id = call(&router, Method::PUT, Some(json!({"title": "Emma"}))).await;
    assert_eq!(no_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_id.json["error"], "Book ID is required for updates");

    let no_id = call(&router, Method::DELETE, Some(json!({}))).await;
    assert_eq!(no_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_id.json["error"], "Book ID is required");

    let no_body = call(&router, Method::DELETE, None).await;
    assert_eq!(no_body.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_body.json["error"], "Book ID is required");

    let missing = call(&router, Method::PUT, Some(json!({"id": 404, "title": "x"}))).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json["error"], "Book not found");

    let missing = call(&router, Method::DELETE, Some(json!({"id": 404}))).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json["success"], false);
}

#[tokio::test]
async fn list_reflects_creates_minus_deletes() {
    let app = test_app().await;
    let router = app.router();

    let mut ids = Vec::new();
    for n in 0..5 {
        let created = call(
            &router,
            Method::POST,
            Some(json!({"title": format!("Volume {n}"), "author": "Anon", "genre": "misc"})),
        )
        .await;
        ids.push(created.json["data"]["id"].as_i64().unwrap());
    }

    for id in &ids[..2] {
        let deleted = call(&router, Method::DELETE, Some(json!({"id": id}))).await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.json["message"], "Book deleted successfully");
    }

    assert_eq!(listed_ids(&router).await, ids[2..].to_vec());
}

#[tokio::test]
async fn dune_round_trip() {
    let app = test_app().await;
    let router = app.router();

    let created = call(
        &router,
        Method::POST,
        Some(json!({"title": "Dune", "author": "Herbert", "genre": "scifi"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let k = created.json["data"]["id"].as_i64().unwrap();

    let listed = call(&router, Method::GET, None).await;
    assert!(listed.json["data"]
        .as_array()
        .unwrap()
        .contains(&json!({"id": k, "title": "Dune", "author": "Herbert", "genre": "scifi"})));

    let updated = call(
        &router,
        Method::PUT,
        Some(json!({"id": k, "genre": "scifi-classic"})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let listed = call(&router, Method::GET, None).await;
    assert_eq!(
        listed.json["data"][0],
        json!({"id": k, "title": "Dune", "author": "Herbert", "genre": "scifi-classic"})
    );

    let deleted = call(&router, Method::DELETE, Some(json!({"id": k}))).await;
    assert_eq!(deleted.status, StatusCode::OK);

    assert!(!listed_ids(&router).await.contains(&k));
}

#[tokio::test]
async fn unsupported_verb_lists_allowed_methods() {
    let app = test_app().await;
    let router = app.router();

    for method in [Method::PATCH, Method::OPTIONS, Method::TRACE] {
        let response = call(&router, method.clone(), Some(json!({"id": 1}))).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(response.headers[ALLOW], "GET, POST, PUT, DELETE");
        assert_eq!(response.json["success"], false);
        assert_eq!(response.json["error"], format!("Method {method} not allowed"));
    }

    // The body of a HEAD response is dropped; status and Allow remain.
    let head = call(&router, Method::HEAD, None).await;
    assert_eq!(head.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(head.headers[ALLOW], "GET, POST, PUT, DELETE");
}

#[tokio::test]
async fn preflight_style_options_is_still_rejected() {
    let app = test_app().await;
    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/books")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "PUT")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn loosely_typed_ids_are_accepted_or_reported() {
    let app = test_app().await;
    let router = app.router();
    let created = call(
        &router,
        Method::POST,
        Some(json!({"title": "Emma", "author": "Austen", "genre": "classic"})),
    )
    .await;
    let id = created.json["data"]["id"].as_i64().unwrap();

    let falsy = call(&router, Method::DELETE, Some(json!({"id": false}))).await;
    assert_eq!(falsy.status, StatusCode::BAD_REQUEST);
    assert_eq!(falsy.json["error"], "Book ID is required");

    let nested = call(&router, Method::PUT, Some(json!({"id": [id], "title": "x"}))).await;
    assert_eq!(nested.status, StatusCode::BAD_REQUEST);
    assert_eq!(nested.json["error"], "Book ID must be an integer");

    let float = call(
        &router,
        Method::PUT,
        Some(json!({"id": id as f64, "title": "Persuasion"})),
    )
    .await;
    assert_eq!(float.status, StatusCode::OK);
    assert_eq!(float.json["data"]["title"], "Persuasion");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app().await;
    let router = app.router();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_an_opaque_500() {
    let app = test_app().await;
    let router = app.router();
    sqlx::query("DROP TABLE book")
        .execute(&app.pool)
        .await
        .unwrap();

    let response = call(&router, Method::GET, None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json,
        json!({"success": false, "error": "Internal server error"})
    );
}
