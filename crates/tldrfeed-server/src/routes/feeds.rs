//! Feed Routes - Feeds and their Articles

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};

use tldrfeed::{Article, Feed};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{CreateArticleRequest, CreateArticleResponse, CreateFeedRequest};
use crate::{render, AppState};

/// Create a Feed
#[utoipa::path(
    post,
    path = "/api/v1/feeds",
    request_body = CreateFeedRequest,
    responses(
        (status = 201, description = "Feed created", body = Feed),
        (status = 400, description = "Invalid request body")
    ),
    tag = "Feeds"
)]
pub async fn create_feed(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFeedRequest>,
) -> Result<Response, ApiError> {
    let feed = state.repo.create_feed(&payload.name).await?;
    render::json(&state, StatusCode::CREATED, &feed)
}

/// List Feeds available for subscription
#[utoipa::path(
    get,
    path = "/api/v1/feeds",
    responses((status = 200, description = "All Feeds", body = Vec<Feed>)),
    tag = "Feeds"
)]
pub async fn list_feeds(State(state): State<AppState>) -> Result<Response, ApiError> {
    let feeds = state.repo.list_feeds().await?;
    render::json(&state, StatusCode::OK, &feeds)
}

/// Get a Feed
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{feed_id}",
    params(("feed_id" = String, Path, description = "Feed ID")),
    responses(
        (status = 200, description = "Feed found", body = Feed),
        (status = 404, description = "Feed not found")
    ),
    tag = "Feeds"
)]
pub async fn get_feed(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
) -> Result<Response, ApiError> {
    let feed = state.repo.get_feed(&feed_id).await?;
    render::json(&state, StatusCode::OK, &feed)
}

/// List Articles in a Feed
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{feed_id}/articles",
    params(("feed_id" = String, Path, description = "Feed ID")),
    responses(
        (status = 200, description = "Articles, newest first", body = Vec<Article>),
        (status = 404, description = "Feed not found")
    ),
    tag = "Feeds"
)]
pub async fn list_feed_articles(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
) -> Result<Response, ApiError> {
    let articles = state.repo.list_feed_articles(&feed_id).await?;
    render::json(&state, StatusCode::OK, &articles)
}

/// Add an Article to a Feed
#[utoipa::path(
    post,
    path = "/api/v1/feeds/{feed_id}/articles",
    params(("feed_id" = String, Path, description = "Feed ID")),
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = CreateArticleResponse),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "Feed not found")
    ),
    tag = "Feeds"
)]
pub async fn create_feed_article(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> Result<Response, ApiError> {
    let id = state
        .repo
        .create_feed_article(&feed_id, &payload.title, &payload.body)
        .await?;
    render::json(&state, StatusCode::CREATED, &CreateArticleResponse { id })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feeds", get(list_feeds).post(create_feed))
        .route("/feeds/:feed_id", get(get_feed))
        .route(
            "/feeds/:feed_id/articles",
            get(list_feed_articles).post(create_feed_article),
        )
}
