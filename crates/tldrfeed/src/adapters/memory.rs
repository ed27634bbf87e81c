//! In-memory implementation of FeedRepository
//!
//! Reference backend used by tests and by the server's `memory` mode.
//! All state sits behind one mutex that is held for the whole operation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    errors::DomainError, sort_newest_first, validation::require_non_empty, Article, Feed, User,
};
use crate::ports::FeedRepository;

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    feeds: Vec<Feed>,
    /// user ID -> subscribed feed IDs, no duplicates
    user_feeds: HashMap<String, Vec<String>>,
    /// feed ID -> articles in publication order
    feed_articles: HashMap<String, Vec<Article>>,
}

impl State {
    fn user(&self, user_id: &str) -> Result<&User, DomainError> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    fn feed(&self, feed_id: &str) -> Result<&Feed, DomainError> {
        self.feeds
            .iter()
            .find(|f| f.id == feed_id)
            .ok_or_else(|| DomainError::not_found("feed", feed_id))
    }

    fn subscriptions(&self, user_id: &str) -> Result<&[String], DomainError> {
        self.user_feeds
            .get(user_id)
            .map(Vec::as_slice)
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    /// Resolve user and feed, then require a subscription between them
    fn subscribed_feed(&self, user_id: &str, feed_id: &str) -> Result<&Feed, DomainError> {
        self.user(user_id)?;
        let feed = self.feed(feed_id)?;
        if !self.subscriptions(user_id)?.iter().any(|id| id == feed_id) {
            return Err(DomainError::not_subscribed(user_id, feed_id));
        }
        Ok(feed)
    }

    fn articles<'a>(&self, feed_ids: impl IntoIterator<Item = &'a str>) -> Vec<Article> {
        let mut articles: Vec<Article> = feed_ids
            .into_iter()
            .filter_map(|id| self.feed_articles.get(id))
            .flatten()
            .cloned()
            .collect();
        sort_newest_first(&mut articles);
        articles
    }
}

/// In-memory FeedRepository
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::storage("in-memory repository lock poisoned"))
    }
}

#[async_trait]
impl FeedRepository for InMemoryRepository {
    async fn create_user(&self, name: &str) -> Result<User, DomainError> {
        require_non_empty("User name", name)?;

        let user = User::new(name);
        let mut state = self.lock()?;
        state.users.push(user.clone());
        state.user_feeds.insert(user.id.clone(), Vec::new());

        tracing::info!("Created User: {} ({})", user.name, user.id);
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.lock()?.users.clone())
    }

    async fn get_user(&self, user_id: &str) -> Result<User, DomainError> {
        self.lock()?.user(user_id).cloned()
    }

    async fn create_feed(&self, name: &str) -> Result<Feed, DomainError> {
        require_non_empty("Feed name", name)?;

        let feed = Feed::new(name);
        let mut state = self.lock()?;
        state.feeds.push(feed.clone());
        state.feed_articles.insert(feed.id.clone(), Vec::new());

        tracing::info!("Created Feed: {} ({})", feed.name, feed.id);
        Ok(feed)
    }

    async fn list_feeds(&self) -> Result<Vec<Feed>, DomainError> {
        Ok(self.lock()?.feeds.clone())
    }

    async fn get_feed(&self, feed_id: &str) -> Result<Feed, DomainError> {
        self.lock()?.feed(feed_id).cloned()
    }

    async fn list_feed_articles(&self, feed_id: &str) -> Result<Vec<Article>, DomainError> {
        let state = self.lock()?;
        state.feed(feed_id)?;
        Ok(state.articles([feed_id]))
    }

    async fn create_feed_article(
        &self,
        feed_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, DomainError> {
        require_non_empty("Article title", title)?;
        require_non_empty("Article body", body)?;

        let mut state = self.lock()?;
        state.feed(feed_id)?;

        let article = Article::new(title, body);
        let article_id = article.id.clone();
        state
            .feed_articles
            .entry(feed_id.to_string())
            .or_default()
            .push(article);

        tracing::info!("Created Article {} in Feed {}", article_id, feed_id);
        Ok(article_id)
    }

    async fn add_user_feed(&self, user_id: &str, feed_id: &str) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        state.user(user_id)?;
        state.feed(feed_id)?;

        let feeds = state.user_feeds.entry(user_id.to_string()).or_default();
        if feeds.iter().any(|id| id == feed_id) {
            tracing::debug!("User {} already subscribed to Feed {}", user_id, feed_id);
            return Ok(());
        }
        feeds.push(feed_id.to_string());

        tracing::info!("Subscribed User {} to Feed {}", user_id, feed_id);
        Ok(())
    }

    async fn list_user_feeds(&self, user_id: &str) -> Result<Vec<Feed>, DomainError> {
        let state = self.lock()?;
        let subscribed = state.subscriptions(user_id)?;
        Ok(state
            .feeds
            .iter()
            .filter(|f| subscribed.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn get_user_feed(&self, user_id: &str, feed_id: &str) -> Result<Feed, DomainError> {
        self.lock()?.subscribed_feed(user_id, feed_id).cloned()
    }

    async fn list_user_articles(&self, user_id: &str) -> Result<Vec<Article>, DomainError> {
        let state = self.lock()?;
        let subscribed = state.subscriptions(user_id)?;
        Ok(state.articles(subscribed.iter().map(String::as_str)))
    }

    async fn list_user_feed_articles(
        &self,
        user_id: &str,
        feed_id: &str,
    ) -> Result<Vec<Article>, DomainError> {
        let state = self.lock()?;
        state.subscribed_feed(user_id, feed_id)?;
        Ok(state.articles([feed_id]))
    }

    async fn close(&self) {
        tracing::debug!("In-memory repository closed");
    }
}
