//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use tldrfeed::{Article, Feed, User};

use crate::models::{
    AddUserFeedRequest, CreateArticleRequest, CreateArticleResponse, CreateFeedRequest,
    CreateUserRequest,
};

use super::health::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health_check,
        // User endpoints
        super::users::create_user,
        super::users::list_users,
        super::users::get_user,
        super::users::list_user_feeds,
        super::users::add_user_feed,
        super::users::get_user_feed,
        super::users::list_user_feed_articles,
        super::users::list_user_articles,
        // Feed endpoints
        super::feeds::create_feed,
        super::feeds::list_feeds,
        super::feeds::get_feed,
        super::feeds::list_feed_articles,
        super::feeds::create_feed_article,
    ),
    components(schemas(
        User,
        Feed,
        Article,
        CreateUserRequest,
        CreateFeedRequest,
        AddUserFeedRequest,
        CreateArticleRequest,
        CreateArticleResponse,
        HealthCheck,
    )),
    tags(
        (name = "Users", description = "Users and their Feed subscriptions"),
        (name = "Feeds", description = "Feeds and their Articles"),
        (name = "Health", description = "Liveness")
    ),
    info(
        title = "tldrfeed API",
        description = "Easy to use JSON news feeds for everyone"
    )
)]
pub struct ApiDoc;
