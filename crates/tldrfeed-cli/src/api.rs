//! tldrfeed API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Version prefix of every API route
pub const API_VERSION: &str = "/api/v1";

/// REST client for programmatic interaction with the tldrfeed service
pub struct TldrfeedClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feed {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateFeedRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateArticleRequest<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct AddUserFeedRequest<'a> {
    feed_id: &'a str,
}

impl TldrfeedClient {
    /// Create a new API client for the service at `url`
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}{}", url.trim_end_matches('/'), API_VERSION),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to tldrfeed API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body.trim());
        }

        Ok(resp)
    }

    async fn receive<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Self::send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Create a new User
    pub async fn create_user(&self, name: &str) -> Result<User> {
        Self::receive(
            self.client
                .post(self.url("users"))
                .json(&CreateUserRequest { name }),
        )
        .await
    }

    /// Create a new Feed
    pub async fn create_feed(&self, name: &str) -> Result<Feed> {
        Self::receive(
            self.client
                .post(self.url("feeds"))
                .json(&CreateFeedRequest { name }),
        )
        .await
    }

    /// Publish a new Article to a Feed, returning its ID
    pub async fn create_article(&self, feed_id: &str, title: &str, body: &str) -> Result<String> {
        let created: CreateArticleResponse = Self::receive(
            self.client
                .post(self.url(&format!("feeds/{}/articles", feed_id)))
                .json(&CreateArticleRequest { title, body }),
        )
        .await?;
        Ok(created.id)
    }

    /// Subscribe a User to a Feed
    pub async fn subscribe(&self, user_id: &str, feed_id: &str) -> Result<String> {
        let resp = Self::send(
            self.client
                .post(self.url(&format!("users/{}/feeds", user_id)))
                .json(&AddUserFeedRequest { feed_id }),
        )
        .await?;
        resp.text().await.context("Failed to read response")
    }

    /// List all Users
    pub async fn list_users(&self) -> Result<Vec<User>> {
        Self::receive(self.client.get(self.url("users"))).await
    }

    /// Get a User
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        Self::receive(self.client.get(self.url(&format!("users/{}", user_id)))).await
    }

    /// List all Feeds
    pub async fn list_feeds(&self) -> Result<Vec<Feed>> {
        Self::receive(self.client.get(self.url("feeds"))).await
    }

    /// Get a Feed
    pub async fn get_feed(&self, feed_id: &str) -> Result<Feed> {
        Self::receive(self.client.get(self.url(&format!("feeds/{}", feed_id)))).await
    }

    /// Get a Feed the User is subscribed to
    pub async fn get_user_feed(&self, user_id: &str, feed_id: &str) -> Result<Feed> {
        Self::receive(
            self.client
                .get(self.url(&format!("users/{}/feeds/{}", user_id, feed_id))),
        )
        .await
    }

    /// List Feeds a User is subscribed to
    pub async fn list_user_feeds(&self, user_id: &str) -> Result<Vec<Feed>> {
        Self::receive(
            self.client
                .get(self.url(&format!("users/{}/feeds", user_id))),
        )
        .await
    }

    /// List Articles in a Feed
    pub async fn list_articles(&self, feed_id: &str) -> Result<Vec<Article>> {
        Self::receive(
            self.client
                .get(self.url(&format!("feeds/{}/articles", feed_id))),
        )
        .await
    }

    /// List Articles for a User, from all subscribed Feeds or from one
    pub async fn list_user_articles(
        &self,
        user_id: &str,
        feed_id: Option<&str>,
    ) -> Result<Vec<Article>> {
        let path = match feed_id {
            Some(feed_id) => format!("users/{}/feeds/{}/articles", user_id, feed_id),
            None => format!("users/{}/articles", user_id),
        };
        Self::receive(self.client.get(self.url(&path))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = TldrfeedClient::new("http://localhost:8080/");
        assert_eq!(client.url("users"), "http://localhost:8080/api/v1/users");
    }

    #[test]
    fn test_article_decodes_published_at() {
        let article: Article = serde_json::from_str(
            r#"{"id":"a1","title":"A","body":"a1","published_at":"2024-03-01T12:00:00.123Z"}"#,
        )
        .unwrap();
        assert_eq!(article.published_at.timestamp_subsec_millis(), 123);
    }
}
