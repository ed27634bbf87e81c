//! Stored document shapes
//!
//! - users    {_id, name}
//! - feeds    {_id, title, users: [user_id]}
//! - articles {_id, feed_id, title, body, published_at}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tldrfeed::{Article, Feed, User};

pub const USERS: &str = "users";
pub const FEEDS: &str = "feeds";
pub const ARTICLES: &str = "articles";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
        }
    }
}

/// Feed document, carrying the IDs of its subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "title")]
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
}

impl FeedDocument {
    pub fn has_subscriber(&self, user_id: &str) -> bool {
        self.users.iter().any(|id| id == user_id)
    }
}

impl From<&Feed> for FeedDocument {
    fn from(feed: &Feed) -> Self {
        Self {
            id: feed.id.clone(),
            name: feed.name.clone(),
            users: Vec::new(),
        }
    }
}

impl From<FeedDocument> for Feed {
    fn from(doc: FeedDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub feed_id: String,
    pub title: String,
    pub body: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub published_at: DateTime<Utc>,
}

impl ArticleDocument {
    pub fn new(feed_id: &str, article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            feed_id: feed_id.to_string(),
            title: article.title.clone(),
            body: article.body.clone(),
            published_at: article.published_at,
        }
    }
}

impl From<ArticleDocument> for Article {
    fn from(doc: ArticleDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            body: doc.body,
            published_at: doc.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_document_layout() {
        let feed = Feed::new("Dostoevsky Daily");
        let doc = bson::to_document(&FeedDocument::from(&feed)).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), feed.id);
        assert_eq!(doc.get_str("title").unwrap(), "Dostoevsky Daily");
        assert!(doc.get_array("users").unwrap().is_empty());
    }

    #[test]
    fn test_article_document_stores_bson_datetime() {
        let article = Article::new("A", "a1");
        let doc = bson::to_document(&ArticleDocument::new("feed-1", &article)).unwrap();

        assert_eq!(doc.get_str("feed_id").unwrap(), "feed-1");
        let stored = doc.get_datetime("published_at").unwrap();
        assert_eq!(stored.to_chrono(), article.published_at);
    }

    #[test]
    fn test_feed_document_without_users_field() {
        let doc = bson::doc! { "_id": "f1", "title": "Legacy" };
        let feed: FeedDocument = bson::from_document(doc).unwrap();

        assert!(feed.users.is_empty());
        assert!(!feed.has_subscriber("u1"));
    }
}
