//! API integration tests against the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE, X_FRAME_OPTIONS},
        Method, Request, StatusCode,
    },
    response::Response,
    Router,
};
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api, config::AppConfig, repository::InMemoryBookRepository, AppState,
};

fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(InMemoryBookRepository::new()))
        .expect("Failed to build application state");
    api::create_router(state)
}

fn basic(username: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, basic("librarian", "admin123"));
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

#[tokio::test]
async fn test_missing_credentials_are_challenged() {
    let response = app()
        .oneshot(Request::get("/api/v1/books").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"bookshelf\""
    );
    assert_eq!(response.headers().get(X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/books")
                .header(AUTHORIZATION, basic("patron", "admin123"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_unknown_path_still_requires_credentials() {
    let response = app()
        .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_console_bypasses_authentication() {
    let response = app()
        .oneshot(Request::get("/h2-console/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
    let body = json_body(response).await;
    assert_eq!(body["info"]["title"], "Bookshelf API");
    assert!(body["paths"]["/books/{id}"].is_object());
}

#[tokio::test]
async fn test_console_root_redirects_to_ui() {
    let response = app()
        .oneshot(Request::get("/h2-console").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get("location").unwrap(), "/h2-console/ui/");
}

#[tokio::test]
async fn test_patron_sees_own_principal() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/me")
                .header(AUTHORIZATION, basic("patron", "user123"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "username": "patron", "role": "USER" }));
}

#[tokio::test]
async fn test_dune_lifecycle() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/v1/books",
            Some(json!({ "title": "Dune", "author": "Herbert", "availableCopies": 3 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(
        created,
        json!({ "id": 1, "title": "Dune", "author": "Herbert", "availableCopies": 3 })
    );

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/v1/books/1",
            Some(json!({ "title": "Dune", "author": "Herbert", "availableCopies": 2 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/v1/books/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["availableCopies"], 2);

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, "/api/v1/books/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/v1/books/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // deleting again is not an error
    let response = app
        .oneshot(request(Method::DELETE, "/api/v1/books/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_missing_book_is_not_found() {
    let response = app()
        .oneshot(request(
            Method::PUT,
            "/api/v1/books/999",
            Some(json!({ "title": "Any", "author": "One", "availableCopies": 1 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_negative_copies_are_rejected() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/books",
            Some(json!({ "title": "Dune", "author": "Herbert", "availableCopies": -1 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_author_is_rejected() {
    let response = app()
        .oneshot(request(
            Method::POST,
            "/api/v1/books",
            Some(json!({ "title": "Dune", "author": "", "availableCopies": 1 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "BadValue");
}

#[tokio::test]
async fn test_list_books() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/v1/books", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!([]));

    for title in ["Emma", "Ulysses"] {
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/v1/books",
                Some(json!({ "title": title, "author": "Someone", "availableCopies": 1 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(request(Method::GET, "/api/v1/books", None))
        .await
        .unwrap();
    let books = json_body(response).await;
    let titles: Vec<&str> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Emma", "Ulysses"]);
}
