//! Repository contract against a live MongoDB.
//!
//! Set `TLDRFEED_TEST_DB_URL` (e.g. `mongodb://localhost:27017`) to run;
//! otherwise every test is skipped. Each test uses its own database, dropped
//! on connect.

use tldrfeed::{testing, FeedRepository};
use tldrfeed_server::adapters::{MongoConfig, MongoRepository};

const ENV_TEST_DB: &str = "TLDRFEED_TEST_DB_URL";

async fn test_repository(name: &str) -> Option<MongoRepository> {
    let Ok(uri) = std::env::var(ENV_TEST_DB) else {
        eprintln!("Skipped DB test - {} not set", ENV_TEST_DB);
        return None;
    };

    let config = MongoConfig {
        uri,
        database: format!("test-tldrfeed-{}", name),
        reset: true,
    };
    Some(
        MongoRepository::connect(&config)
            .await
            .expect("Failed to connect to test DB"),
    )
}

macro_rules! contract_test {
    ($name:ident) => {
        #[tokio::test]
        async fn $name() {
            if let Some(repo) = test_repository(stringify!($name)).await {
                testing::$name(&repo).await;
                repo.close().await;
            }
        }
    };
}

contract_test!(user_round_trip);
contract_test!(feed_round_trip);
contract_test!(unknown_ids_are_not_found);
contract_test!(blank_input_is_rejected);
contract_test!(subscribe_is_idempotent);
contract_test!(get_user_feed_requires_subscription);
contract_test!(feed_articles_newest_first);
contract_test!(user_articles_cover_subscribed_feeds_only);
contract_test!(user_feed_articles_require_subscription);
contract_test!(alexandra_reads_dostoevsky_daily);
contract_test!(existence_checks_run_user_then_feed);

#[tokio::test]
async fn subscribe_stores_single_user_id() {
    let Some(repo) = test_repository("subscribe_stores_single_user_id").await else {
        return;
    };

    let user = repo.create_user("alexandra").await.unwrap();
    let feed = repo.create_feed("Dostoevsky Daily").await.unwrap();
    for _ in 0..3 {
        repo.add_user_feed(&user.id, &feed.id).await.unwrap();
    }

    assert_eq!(repo.list_user_feeds(&user.id).await.unwrap(), vec![feed]);
    repo.close().await;
}
