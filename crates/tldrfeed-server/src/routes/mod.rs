//! tldrfeed API Routes
//!
//! - /health - Liveness
//! - /api/v1/users - Users and their subscriptions
//! - /api/v1/feeds - Feeds and their Articles
//! - /swagger-ui - OpenAPI documentation

pub mod feeds;
pub mod health;
pub mod swagger;
pub mod users;
