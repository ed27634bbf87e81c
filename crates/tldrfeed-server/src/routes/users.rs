//! User Routes - Users and their subscriptions
//!
//! HTTP handlers that delegate to the FeedRepository.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use tldrfeed::{Article, Feed, User};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{AddUserFeedRequest, CreateUserRequest};
use crate::{render, AppState};

/// Create a User
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let user = state.repo.create_user(&payload.name).await?;
    render::json(&state, StatusCode::CREATED, &user)
}

/// List Users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All Users", body = Vec<User>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state.repo.list_users().await?;
    render::json(&state, StatusCode::OK, &users)
}

/// Get a User
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.repo.get_user(&user_id).await?;
    render::json(&state, StatusCode::OK, &user)
}

/// List Feeds a User is following
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/feeds",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Subscribed Feeds", body = Vec<Feed>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn list_user_feeds(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let feeds = state.repo.list_user_feeds(&user_id).await?;
    render::json(&state, StatusCode::OK, &feeds)
}

/// Subscribe a User to a Feed
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/feeds",
    params(("user_id" = String, Path, description = "User ID")),
    request_body = AddUserFeedRequest,
    responses(
        (status = 202, description = "Subscription accepted"),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "User or Feed not found")
    ),
    tag = "Users"
)]
pub async fn add_user_feed(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<AddUserFeedRequest>,
) -> Result<Response, ApiError> {
    state.repo.add_user_feed(&user_id, &payload.feed_id).await?;

    Ok((
        StatusCode::ACCEPTED,
        format!(
            "Successfully subscribed User '{}' to Feed '{}'",
            user_id, payload.feed_id
        ),
    )
        .into_response())
}

/// Get a Feed a User is following
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/feeds/{feed_id}",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("feed_id" = String, Path, description = "Feed ID")
    ),
    responses(
        (status = 200, description = "Subscribed Feed", body = Feed),
        (status = 404, description = "User or Feed not found, or not subscribed")
    ),
    tag = "Users"
)]
pub async fn get_user_feed(
    State(state): State<AppState>,
    Path((user_id, feed_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let feed = state.repo.get_user_feed(&user_id, &feed_id).await?;
    render::json(&state, StatusCode::OK, &feed)
}

/// List Articles in one Feed a User is following
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/feeds/{feed_id}/articles",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("feed_id" = String, Path, description = "Feed ID")
    ),
    responses(
        (status = 200, description = "Articles, newest first", body = Vec<Article>),
        (status = 404, description = "User or Feed not found, or not subscribed")
    ),
    tag = "Users"
)]
pub async fn list_user_feed_articles(
    State(state): State<AppState>,
    Path((user_id, feed_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let articles = state
        .repo
        .list_user_feed_articles(&user_id, &feed_id)
        .await?;
    render::json(&state, StatusCode::OK, &articles)
}

/// List Articles across every Feed a User is following
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/articles",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Articles, newest first", body = Vec<Article>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn list_user_articles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    let articles = state.repo.list_user_articles(&user_id).await?;
    render::json(&state, StatusCode::OK, &articles)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:user_id", get(get_user))
        .route(
            "/users/:user_id/feeds",
            get(list_user_feeds).post(add_user_feed),
        )
        .route("/users/:user_id/feeds/:feed_id", get(get_user_feed))
        .route(
            "/users/:user_id/feeds/:feed_id/articles",
            get(list_user_feed_articles),
        )
        .route("/users/:user_id/articles", get(list_user_articles))
}
