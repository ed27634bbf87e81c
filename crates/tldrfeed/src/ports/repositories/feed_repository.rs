//! Feed Repository Port
//!
//! Abstract interface for persistence of Users, Feeds and Articles.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Article, Feed, User};

/// Repository interface shared by every storage backend.
///
/// Lookups that a write depends on always run before the write, in the
/// order user, feed, subscription. Lists of articles are newest-first.
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Create a User with a generated ID
    async fn create_user(&self, name: &str) -> Result<User, DomainError>;

    /// List all Users in creation order
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Get a User by ID
    async fn get_user(&self, user_id: &str) -> Result<User, DomainError>;

    /// Create a Feed with a generated ID
    async fn create_feed(&self, name: &str) -> Result<Feed, DomainError>;

    /// List all Feeds in creation order
    async fn list_feeds(&self) -> Result<Vec<Feed>, DomainError>;

    /// Get a Feed by ID
    async fn get_feed(&self, feed_id: &str) -> Result<Feed, DomainError>;

    /// List Articles of a Feed
    async fn list_feed_articles(&self, feed_id: &str) -> Result<Vec<Article>, DomainError>;

    /// Publish an Article to a Feed, returning the new Article ID
    async fn create_feed_article(
        &self,
        feed_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, DomainError>;

    /// Subscribe a User to a Feed. Subscribing twice is a no-op.
    async fn add_user_feed(&self, user_id: &str, feed_id: &str) -> Result<(), DomainError>;

    /// List Feeds a User is subscribed to, in Feed creation order
    async fn list_user_feeds(&self, user_id: &str) -> Result<Vec<Feed>, DomainError>;

    /// Get a Feed the User is subscribed to
    async fn get_user_feed(&self, user_id: &str, feed_id: &str) -> Result<Feed, DomainError>;

    /// List Articles across every Feed the User is subscribed to
    async fn list_user_articles(&self, user_id: &str) -> Result<Vec<Article>, DomainError>;

    /// List Articles of one Feed the User is subscribed to
    async fn list_user_feed_articles(
        &self,
        user_id: &str,
        feed_id: &str,
    ) -> Result<Vec<Article>, DomainError>;

    /// Release storage resources
    async fn close(&self);
}
