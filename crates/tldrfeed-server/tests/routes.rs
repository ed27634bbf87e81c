use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tldrfeed::{testing, FeedRepository, InMemoryRepository};
use tldrfeed_server::{router, AppState};

fn test_app() -> (Router, InMemoryRepository) {
    let repo = InMemoryRepository::new();
    let app = router(AppState::new(Arc::new(repo.clone()), true));
    (app, repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "ok");
}

#[tokio::test]
async fn test_create_invalid_user() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_blank_name_user() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::POST, "/api/v1/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("User name cannot be blank"));
}

#[tokio::test]
async fn test_create_non_alphanum_name_user() {
    let (app, _) = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "name": "%$*&!!!" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_valid_user() {
    let (app, repo) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "name": "boris" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = parse(&body);
    assert_eq!(user["name"], "boris");

    let id = user["id"].as_str().unwrap();
    assert_eq!(repo.get_user(id).await.unwrap().name, "boris");
}

#[tokio::test]
async fn test_indented_json() {
    let (app, repo) = test_app();
    repo.create_user("natasha").await.unwrap();

    let (_, body) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert!(body.contains('\n'));
}

#[tokio::test]
async fn test_compact_json() {
    let repo = InMemoryRepository::new();
    repo.create_user("natasha").await.unwrap();
    let app = router(AppState::new(Arc::new(repo), false));

    let (_, body) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert!(!body.contains('\n'));
}

#[tokio::test]
async fn test_list_and_get_users() {
    let (app, repo) = test_app();
    let user = repo.create_user("natasha").await.unwrap();

    let (status, body) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = parse(&body);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "natasha");

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/users/{}", user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["id"], user.id.as_str());
}

#[tokio::test]
async fn test_get_unknown_user() {
    let (app, _) = test_app();
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/users/{}", testing::UNKNOWN_ID),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feed_lifecycle() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/feeds",
        Some(json!({ "name": "Dostoevsky Daily" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let feed_id = parse(&body)["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/feeds/{}", feed_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["name"], "Dostoevsky Daily");

    let (status, body) = send(&app, Method::GET, "/api/v1/feeds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_feed_article() {
    let (app, repo) = test_app();
    let feed = repo.create_feed("Chekhov Chronicle").await.unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/feeds/{}/articles", feed.id),
        Some(json!({ "title": "The Seagull", "body": "A comedy in four acts" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let article_id = parse(&body)["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/feeds/{}/articles", feed.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let articles = parse(&body);
    assert_eq!(articles[0]["id"], article_id.as_str());
    assert!(articles[0]["published_at"].is_string());
}

#[tokio::test]
async fn test_create_article_blank_body() {
    let (app, repo) = test_app();
    let feed = repo.create_feed("Chekhov Chronicle").await.unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/feeds/{}/articles", feed.id),
        Some(json!({ "title": "Untitled" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Article body cannot be blank"));
}

#[tokio::test]
async fn test_create_article_unknown_feed() {
    let (app, _) = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/feeds/{}/articles", testing::UNKNOWN_ID),
        Some(json!({ "title": "t", "body": "b" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscription_flow() {
    let (app, repo) = test_app();
    let user = repo.create_user("alexandra").await.unwrap();
    let feed = repo.create_feed("Dostoevsky Daily").await.unwrap();
    repo.create_feed_article(&feed.id, "A", "a1").await.unwrap();
    testing::tick().await;
    repo.create_feed_article(&feed.id, "B", "b1").await.unwrap();

    let user_feed = format!("/api/v1/users/{}/feeds/{}", user.id, feed.id);

    let (status, _) = send(&app, Method::GET, &user_feed, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{}/feeds", user.id),
            Some(json!({ "feed_id": feed.id })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.starts_with("Successfully subscribed User"));
    }

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/users/{}/feeds", user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, &user_feed, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["name"], "Dostoevsky Daily");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/users/{}/articles", user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let articles = parse(&body);
    assert_eq!(articles[0]["title"], "B");
    assert_eq!(articles[1]["title"], "A");

    let (status, body) = send(&app, Method::GET, &format!("{}/articles", user_feed), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_subscribe_requires_feed_id() {
    let (app, repo) = test_app();
    let user = repo.create_user("ivan").await.unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/users/{}/feeds", user.id),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscribe_unknown_feed() {
    let (app, repo) = test_app();
    let user = repo.create_user("ivan").await.unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/users/{}/feeds", user.id),
        Some(json!({ "feed_id": testing::UNKNOWN_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let doc = parse(&body);
    assert!(doc["paths"]["/api/v1/users/{user_id}/articles"].is_object());
}
