//! Repository contract suite
//!
//! Backend-agnostic checks every `FeedRepository` must pass. Each check
//! expects a fresh, empty repository.

use std::time::Duration;

use crate::domain::{Article, DomainError};
use crate::ports::FeedRepository;

/// An ID no backend will ever hand out
pub const UNKNOWN_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Pause between publications so timestamps differ at millisecond resolution
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(3)).await;
}

fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}

/// `(published_at, id)` must strictly decrease
fn assert_strictly_newest_first(articles: &[Article]) {
    for pair in articles.windows(2) {
        assert!(
            (pair[0].published_at, &pair[0].id) > (pair[1].published_at, &pair[1].id),
            "articles out of order: {:?}",
            titles(articles)
        );
    }
}

pub async fn user_round_trip(repo: &dyn FeedRepository) {
    let user = repo.create_user("alexandra").await.unwrap();
    assert!(!user.id.is_empty());
    assert_eq!(user.name, "alexandra");

    let fetched = repo.get_user(&user.id).await.unwrap();
    assert_eq!(fetched, user);

    let other = repo.create_user("boris").await.unwrap();
    assert_ne!(other.id, user.id);

    let users = repo.list_users().await.unwrap();
    assert_eq!(users, vec![user, other]);
}

pub async fn feed_round_trip(repo: &dyn FeedRepository) {
    let feed = repo.create_feed("Dostoevsky Daily").await.unwrap();
    assert!(!feed.id.is_empty());

    let fetched = repo.get_feed(&feed.id).await.unwrap();
    assert_eq!(fetched, feed);

    let other = repo.create_feed("Chekhov Chronicle").await.unwrap();
    let feeds = repo.list_feeds().await.unwrap();
    assert_eq!(feeds, vec![feed.clone(), other]);

    assert!(repo.list_feed_articles(&feed.id).await.unwrap().is_empty());
}

pub async fn unknown_ids_are_not_found(repo: &dyn FeedRepository) {
    assert!(matches!(
        repo.get_user(UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.get_feed(UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.list_feed_articles(UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.create_feed_article(UNKNOWN_ID, "title", "body").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.list_user_feeds(UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.list_user_articles(UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));

    let user = repo.create_user("natasha").await.unwrap();
    let feed = repo.create_feed("Gogol Gazette").await.unwrap();
    assert!(matches!(
        repo.add_user_feed(UNKNOWN_ID, &feed.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.add_user_feed(&user.id, UNKNOWN_ID).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(repo.list_user_feeds(&user.id).await.unwrap().is_empty());
}

pub async fn blank_input_is_rejected(repo: &dyn FeedRepository) {
    assert!(matches!(
        repo.create_user("").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        repo.create_feed("   ").await,
        Err(DomainError::Validation(_))
    ));

    let feed = repo.create_feed("Pushkin Post").await.unwrap();
    assert!(matches!(
        repo.create_feed_article(&feed.id, "", "body").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        repo.create_feed_article(&feed.id, "title", "").await,
        Err(DomainError::Validation(_))
    ));

    assert!(repo.list_users().await.unwrap().is_empty());
    assert_eq!(repo.list_feeds().await.unwrap().len(), 1);
    assert!(repo.list_feed_articles(&feed.id).await.unwrap().is_empty());
}

pub async fn subscribe_is_idempotent(repo: &dyn FeedRepository) {
    let user = repo.create_user("alexey").await.unwrap();
    let feed = repo.create_feed("Tolstoy Weekly").await.unwrap();

    repo.add_user_feed(&user.id, &feed.id).await.unwrap();
    let once = repo.list_user_feeds(&user.id).await.unwrap();

    repo.add_user_feed(&user.id, &feed.id).await.unwrap();
    let twice = repo.list_user_feeds(&user.id).await.unwrap();

    assert_eq!(once, vec![feed]);
    assert_eq!(twice, once);
}

pub async fn get_user_feed_requires_subscription(repo: &dyn FeedRepository) {
    let user = repo.create_user("ivan").await.unwrap();
    let feed = repo.create_feed("Turgenev Times").await.unwrap();

    assert!(matches!(
        repo.get_user_feed(&user.id, &feed.id).await,
        Err(DomainError::NotSubscribed { .. })
    ));

    repo.add_user_feed(&user.id, &feed.id).await.unwrap();

    assert_eq!(repo.get_user_feed(&user.id, &feed.id).await.unwrap(), feed);
}

pub async fn feed_articles_newest_first(repo: &dyn FeedRepository) {
    let feed = repo.create_feed("Bulgakov Bulletin").await.unwrap();
    for title in ["first", "second", "third"] {
        repo.create_feed_article(&feed.id, title, "body")
            .await
            .unwrap();
        tick().await;
    }

    let articles = repo.list_feed_articles(&feed.id).await.unwrap();
    assert_eq!(titles(&articles), ["third", "second", "first"]);
    assert_strictly_newest_first(&articles);
}

pub async fn user_articles_cover_subscribed_feeds_only(repo: &dyn FeedRepository) {
    let user = repo.create_user("sonya").await.unwrap();
    let news = repo.create_feed("News").await.unwrap();
    let sport = repo.create_feed("Sport").await.unwrap();
    let ignored = repo.create_feed("Weather").await.unwrap();

    for (feed, title) in [
        (&news, "n1"),
        (&sport, "s1"),
        (&ignored, "w1"),
        (&news, "n2"),
        (&sport, "s2"),
    ] {
        repo.create_feed_article(&feed.id, title, "body")
            .await
            .unwrap();
        tick().await;
    }

    assert!(repo.list_user_articles(&user.id).await.unwrap().is_empty());

    repo.add_user_feed(&user.id, &sport.id).await.unwrap();
    repo.add_user_feed(&user.id, &news.id).await.unwrap();

    let articles = repo.list_user_articles(&user.id).await.unwrap();
    assert_eq!(titles(&articles), ["s2", "n2", "s1", "n1"]);
    assert_strictly_newest_first(&articles);
}

pub async fn user_feed_articles_require_subscription(repo: &dyn FeedRepository) {
    let user = repo.create_user("pierre").await.unwrap();
    let feed = repo.create_feed("War Dispatches").await.unwrap();
    let other = repo.create_feed("Peace Notes").await.unwrap();

    repo.create_feed_article(&feed.id, "old", "body")
        .await
        .unwrap();
    tick().await;
    repo.create_feed_article(&feed.id, "new", "body")
        .await
        .unwrap();
    repo.create_feed_article(&other.id, "elsewhere", "body")
        .await
        .unwrap();

    assert!(matches!(
        repo.list_user_feed_articles(&user.id, &feed.id).await,
        Err(DomainError::NotSubscribed { .. })
    ));

    repo.add_user_feed(&user.id, &feed.id).await.unwrap();

    let articles = repo.list_user_feed_articles(&user.id, &feed.id).await.unwrap();
    assert_eq!(titles(&articles), ["new", "old"]);
    assert_strictly_newest_first(&articles);
    assert!(matches!(
        repo.list_user_feed_articles(&user.id, &other.id).await,
        Err(DomainError::NotSubscribed { .. })
    ));
}

pub async fn alexandra_reads_dostoevsky_daily(repo: &dyn FeedRepository) {
    let user = repo.create_user("alexandra").await.unwrap();
    let feed = repo.create_feed("Dostoevsky Daily").await.unwrap();

    repo.create_feed_article(&feed.id, "A", "a1").await.unwrap();
    tick().await;
    repo.create_feed_article(&feed.id, "B", "b1").await.unwrap();
    repo.add_user_feed(&user.id, &feed.id).await.unwrap();

    let articles = repo.list_user_articles(&user.id).await.unwrap();
    assert_eq!(titles(&articles), ["B", "A"]);
    assert_strictly_newest_first(&articles);
    assert_eq!(articles[0].body, "b1");
    assert_eq!(articles[1].body, "a1");
}

pub async fn existence_checks_run_user_then_feed(repo: &dyn FeedRepository) {
    let user = repo.create_user("dmitri").await.unwrap();
    let feed = repo.create_feed("Karamazov Courier").await.unwrap();

    assert!(matches!(
        repo.get_user_feed(UNKNOWN_ID, &feed.id).await,
        Err(DomainError::NotFound { entity_type, .. }) if entity_type == "user"
    ));
    assert!(matches!(
        repo.get_user_feed(UNKNOWN_ID, UNKNOWN_ID).await,
        Err(DomainError::NotFound { entity_type, .. }) if entity_type == "user"
    ));
    assert!(matches!(
        repo.get_user_feed(&user.id, UNKNOWN_ID).await,
        Err(DomainError::NotFound { entity_type, .. }) if entity_type == "feed"
    ));
    assert!(matches!(
        repo.list_user_feed_articles(&user.id, UNKNOWN_ID).await,
        Err(DomainError::NotFound { entity_type, .. }) if entity_type == "feed"
    ));
}
