//! MongoDB implementation of FeedRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Client, ClientSession, Collection, Database, IndexModel, SessionCursor,
};
use serde::de::DeserializeOwned;

use tldrfeed::domain::validation::require_non_empty;
use tldrfeed::{Article, DomainError, Feed, FeedRepository, User};

use super::documents::{ArticleDocument, FeedDocument, UserDocument, ARTICLES, FEEDS, USERS};

/// Connection settings for the document store
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`
    pub uri: String,
    /// Database holding the three collections
    pub database: String,
    /// Drop the database on connect (test databases only)
    pub reset: bool,
}

/// MongoDB implementation of FeedRepository
///
/// The client is a connection pool; every operation runs in its own session.
#[derive(Clone)]
pub struct MongoRepository {
    client: Client,
    db: Database,
}

fn storage_error(err: mongodb::error::Error) -> DomainError {
    tracing::warn!("MongoDB operation failed: {}", err);
    DomainError::storage(err)
}

/// Sort order matching `tldrfeed::sort_newest_first`
fn newest_first() -> Document {
    doc! { "published_at": -1, "_id": -1 }
}

impl MongoRepository {
    pub async fn connect(config: &MongoConfig) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(storage_error)?;
        let db = client.database(&config.database);

        if config.reset {
            db.drop().await.map_err(storage_error)?;
            tracing::warn!("Dropped database '{}'", config.database);
        }

        let repo = Self { client, db };
        repo.ensure_indexes().await?;

        tracing::info!("Connected to MongoDB database '{}'", config.database);
        Ok(repo)
    }

    async fn ensure_indexes(&self) -> Result<(), DomainError> {
        self.articles()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "feed_id": 1, "published_at": -1 })
                    .build(),
            )
            .await
            .map_err(storage_error)?;

        self.feeds()
            .create_index(IndexModel::builder().keys(doc! { "users": 1 }).build())
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    fn users(&self) -> Collection<UserDocument> {
        self.db.collection(USERS)
    }

    fn feeds(&self) -> Collection<FeedDocument> {
        self.db.collection(FEEDS)
    }

    fn articles(&self) -> Collection<ArticleDocument> {
        self.db.collection(ARTICLES)
    }

    /// Open a session for one operation; it is released when dropped
    async fn session(&self) -> Result<ClientSession, DomainError> {
        self.client.start_session().await.map_err(storage_error)
    }

    async fn collect<T>(
        mut cursor: SessionCursor<T>,
        session: &mut ClientSession,
    ) -> Result<Vec<T>, DomainError>
    where
        T: DeserializeOwned + Send + Sync,
    {
        cursor
            .stream(session)
            .try_collect()
            .await
            .map_err(storage_error)
    }

    async fn find_user(
        &self,
        session: &mut ClientSession,
        user_id: &str,
    ) -> Result<UserDocument, DomainError> {
        self.users()
            .find_one(doc! { "_id": user_id })
            .session(&mut *session)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    async fn find_feed(
        &self,
        session: &mut ClientSession,
        feed_id: &str,
    ) -> Result<FeedDocument, DomainError> {
        self.feeds()
            .find_one(doc! { "_id": feed_id })
            .session(&mut *session)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| DomainError::not_found("feed", feed_id))
    }

    async fn find_feeds(
        &self,
        session: &mut ClientSession,
        filter: Document,
    ) -> Result<Vec<FeedDocument>, DomainError> {
        let cursor = self
            .feeds()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .session(&mut *session)
            .await
            .map_err(storage_error)?;
        Self::collect(cursor, session).await
    }

    async fn find_articles(
        &self,
        session: &mut ClientSession,
        filter: Document,
    ) -> Result<Vec<Article>, DomainError> {
        let cursor = self
            .articles()
            .find(filter)
            .sort(newest_first())
            .session(&mut *session)
            .await
            .map_err(storage_error)?;
        let docs = Self::collect(cursor, session).await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    /// Resolve user and feed, then require the user in the feed's subscriber set
    async fn find_subscribed_feed(
        &self,
        session: &mut ClientSession,
        user_id: &str,
        feed_id: &str,
    ) -> Result<FeedDocument, DomainError> {
        self.find_user(session, user_id).await?;
        let feed = self.find_feed(session, feed_id).await?;
        if !feed.has_subscriber(user_id) {
            return Err(DomainError::not_subscribed(user_id, feed_id));
        }
        Ok(feed)
    }
}

#[async_trait]
impl FeedRepository for MongoRepository {
    async fn create_user(&self, name: &str) -> Result<User, DomainError> {
        require_non_empty("User name", name)?;

        let user = User::new(name);
        let mut session = self.session().await?;
        self.users()
            .insert_one(UserDocument::from(&user))
            .session(&mut session)
            .await
            .map_err(storage_error)?;

        tracing::info!("Created User: {} ({})", user.name, user.id);
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let mut session = self.session().await?;
        let cursor = self
            .users()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .session(&mut session)
            .await
            .map_err(storage_error)?;
        let docs = Self::collect(cursor, &mut session).await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn get_user(&self, user_id: &str) -> Result<User, DomainError> {
        let mut session = self.session().await?;
        Ok(self.find_user(&mut session, user_id).await?.into())
    }

    async fn create_feed(&self, name: &str) -> Result<Feed, DomainError> {
        require_non_empty("Feed name", name)?;

        let feed = Feed::new(name);
        let mut session = self.session().await?;
        self.feeds()
            .insert_one(FeedDocument::from(&feed))
            .session(&mut session)
            .await
            .map_err(storage_error)?;

        tracing::info!("Created Feed: {} ({})", feed.name, feed.id);
        Ok(feed)
    }

    async fn list_feeds(&self) -> Result<Vec<Feed>, DomainError> {
        let mut session = self.session().await?;
        let docs = self.find_feeds(&mut session, doc! {}).await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn get_feed(&self, feed_id: &str) -> Result<Feed, DomainError> {
        let mut session = self.session().await?;
        Ok(self.find_feed(&mut session, feed_id).await?.into())
    }

    async fn list_feed_articles(&self, feed_id: &str) -> Result<Vec<Article>, DomainError> {
        let mut session = self.session().await?;
        self.find_feed(&mut session, feed_id).await?;
        self.find_articles(&mut session, doc! { "feed_id": feed_id })
            .await
    }

    async fn create_feed_article(
        &self,
        feed_id: &str,
        title: &str,
        body: &str,
    ) -> Result<String, DomainError> {
        require_non_empty("Article title", title)?;
        require_non_empty("Article body", body)?;

        let mut session = self.session().await?;
        self.find_feed(&mut session, feed_id).await?;

        let article = Article::new(title, body);
        self.articles()
            .insert_one(ArticleDocument::new(feed_id, &article))
            .session(&mut session)
            .await
            .map_err(storage_error)?;

        tracing::info!("Created Article {} in Feed {}", article.id, feed_id);
        Ok(article.id)
    }

    async fn add_user_feed(&self, user_id: &str, feed_id: &str) -> Result<(), DomainError> {
        let mut session = self.session().await?;
        self.find_user(&mut session, user_id).await?;
        self.find_feed(&mut session, feed_id).await?;

        let result = self
            .feeds()
            .update_one(
                doc! { "_id": feed_id },
                doc! { "$addToSet": { "users": user_id } },
            )
            .session(&mut session)
            .await
            .map_err(storage_error)?;

        if result.modified_count == 0 {
            tracing::debug!("User {} already subscribed to Feed {}", user_id, feed_id);
        } else {
            tracing::info!("Subscribed User {} to Feed {}", user_id, feed_id);
        }
        Ok(())
    }

    async fn list_user_feeds(&self, user_id: &str) -> Result<Vec<Feed>, DomainError> {
        let mut session = self.session().await?;
        self.find_user(&mut session, user_id).await?;
        let docs = self
            .find_feeds(&mut session, doc! { "users": user_id })
            .await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn get_user_feed(&self, user_id: &str, feed_id: &str) -> Result<Feed, DomainError> {
        let mut session = self.session().await?;
        Ok(self
            .find_subscribed_feed(&mut session, user_id, feed_id)
            .await?
            .into())
    }

    async fn list_user_articles(&self, user_id: &str) -> Result<Vec<Article>, DomainError> {
        let mut session = self.session().await?;
        self.find_user(&mut session, user_id).await?;

        let feed_ids: Vec<String> = self
            .find_feeds(&mut session, doc! { "users": user_id })
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();
        if feed_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_articles(&mut session, doc! { "feed_id": { "$in": feed_ids } })
            .await
    }

    async fn list_user_feed_articles(
        &self,
        user_id: &str,
        feed_id: &str,
    ) -> Result<Vec<Article>, DomainError> {
        let mut session = self.session().await?;
        self.find_subscribed_feed(&mut session, user_id, feed_id)
            .await?;
        self.find_articles(&mut session, doc! { "feed_id": feed_id })
            .await
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB client shut down");
    }
}
