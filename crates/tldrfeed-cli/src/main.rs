//! tldrfeed CLI - Easy to use JSON news feeds for everyone
//!
//! Thin command-line wrapper over the tldrfeed REST API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use api::{Article, TldrfeedClient};
use config::Config;

#[derive(Parser)]
#[command(name = "tldrfeed")]
#[command(about = "Easy to use JSON news feeds for everyone.", long_about = "tldrfeed is a simple JSON news feed subscription service")]
#[command(version)]
struct Cli {
    /// tldrfeed service URL (overrides the configured one)
    #[arg(short, long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create users, feeds or articles
    Create {
        #[command(subcommand)]
        action: CreateAction,
    },

    /// List users, feeds or articles
    List {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Show a single user or feed
    Get {
        #[command(subcommand)]
        action: GetAction,
    },

    /// Subscribe a user to a feed
    Subscribe(SubscribeArgs),

    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Print tldrfeed version
    Version,
}

#[derive(Subcommand)]
enum CreateAction {
    /// Create new user
    User {
        /// User name
        #[arg(short, long)]
        name: String,
    },
    /// Create new feed
    Feed {
        /// Feed name
        #[arg(short, long)]
        name: String,
    },
    /// Create new article
    Article(CreateArticleArgs),
}

#[derive(Args)]
struct CreateArticleArgs {
    /// Feed ID
    #[arg(short, long)]
    feed: String,
    /// Article title
    #[arg(short, long)]
    title: String,
    /// Article body
    #[arg(short, long)]
    body: String,
}

#[derive(Subcommand)]
enum GetAction {
    /// Show a user
    User { id: String },
    /// Show a feed (through a user's subscription when --user is given)
    Feed {
        id: String,
        /// User ID
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List users
    Users,
    /// List feeds (all, or those a user follows)
    Feeds {
        /// User ID
        #[arg(long)]
        user: Option<String>,
    },
    /// List articles
    Articles(ListArticlesArgs),
}

#[derive(Args)]
struct ListArticlesArgs {
    /// Feed ID
    #[arg(short, long)]
    feed: Option<String>,
    /// User ID (defaults to the configured user when --feed is absent)
    #[arg(long)]
    user: Option<String>,
}

#[derive(Args)]
struct SubscribeArgs {
    /// Feed ID
    #[arg(short, long)]
    feed: String,
    /// User ID (defaults to the configured user)
    #[arg(long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Store the service URL
    SetUrl { url: String },
    /// Store the default user ID
    SetUser { user_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let client = TldrfeedClient::new(&config.url_or(cli.url.as_deref()));

    match cli.command {
        Commands::Create { action } => cmd_create(&client, action).await,
        Commands::Get { action } => cmd_get(&client, action).await,
        Commands::List { action } => cmd_list(&client, &config, action).await,
        Commands::Subscribe(args) => cmd_subscribe(&client, &config, args).await,
        Commands::Config { action } => cmd_config(config, action.unwrap_or(ConfigAction::Show)),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_create(client: &TldrfeedClient, action: CreateAction) -> Result<()> {
    match action {
        CreateAction::User { name } => {
            let user = client
                .create_user(&name)
                .await
                .context("Failed to create User")?;
            println!("{} User created: {} {}", "✓".green(), user.name.cyan(), user.id.dimmed());
        }

        CreateAction::Feed { name } => {
            let feed = client
                .create_feed(&name)
                .await
                .context("Failed to create Feed")?;
            println!("{} Feed created: {} {}", "✓".green(), feed.name.cyan(), feed.id.dimmed());
        }

        CreateAction::Article(args) => {
            let article_id = client
                .create_article(&args.feed, &args.title, &args.body)
                .await
                .context("Failed to create Article")?;
            println!("{} Article created: {}", "✓".green(), article_id.dimmed());
        }
    }

    Ok(())
}

async fn cmd_get(client: &TldrfeedClient, action: GetAction) -> Result<()> {
    match action {
        GetAction::User { id } => {
            let user = client.get_user(&id).await.context("Failed to get User")?;
            println!("{} {}", user.id.dimmed(), user.name.cyan());
        }

        GetAction::Feed { id, user } => {
            let feed = match user {
                Some(user_id) => client.get_user_feed(&user_id, &id).await,
                None => client.get_feed(&id).await,
            }
            .context("Failed to get Feed")?;
            println!("{} {}", feed.id.dimmed(), feed.name.cyan());
        }
    }

    Ok(())
}

async fn cmd_list(client: &TldrfeedClient, config: &Config, action: ListAction) -> Result<()> {
    match action {
        ListAction::Users => {
            let users = client.list_users().await.context("Failed to list Users")?;
            println!("{}", "Users:".bold());
            for user in users {
                println!("  {} {}", user.id.dimmed(), user.name.cyan());
            }
        }

        ListAction::Feeds { user } => {
            let feeds = match user {
                Some(user_id) => client.list_user_feeds(&user_id).await,
                None => client.list_feeds().await,
            }
            .context("Failed to list Feeds")?;

            println!("{}", "Feeds:".bold());
            for feed in feeds {
                println!("  {} {}", feed.id.dimmed(), feed.name.cyan());
            }
        }

        ListAction::Articles(args) => {
            let articles = match article_source(args.feed, args.user, config)? {
                ArticleSource::Feed(feed_id) => {
                    println!("{}", format!("Articles in Feed {}:", feed_id).bold());
                    client.list_articles(&feed_id).await
                }
                ArticleSource::User(user_id) => {
                    println!(
                        "{}",
                        format!("Articles for user {} in all Feeds:", user_id).bold()
                    );
                    client.list_user_articles(&user_id, None).await
                }
                ArticleSource::UserFeed(user_id, feed_id) => {
                    println!(
                        "{}",
                        format!("Articles for user {} in Feed {}:", user_id, feed_id).bold()
                    );
                    client.list_user_articles(&user_id, Some(&feed_id)).await
                }
            }
            .context("Failed to list Articles")?;

            if articles.is_empty() {
                println!("No articles found.");
            }
            for article in &articles {
                print_article(article);
            }
        }
    }

    Ok(())
}

/// Where `list articles` reads from
#[derive(Debug, PartialEq)]
enum ArticleSource {
    Feed(String),
    User(String),
    UserFeed(String, String),
}

/// The default user only applies when neither --feed nor --user is given
fn article_source(
    feed: Option<String>,
    user: Option<String>,
    config: &Config,
) -> Result<ArticleSource> {
    match (user, feed) {
        (Some(user_id), Some(feed_id)) => Ok(ArticleSource::UserFeed(user_id, feed_id)),
        (Some(user_id), None) => Ok(ArticleSource::User(user_id)),
        (None, Some(feed_id)) => Ok(ArticleSource::Feed(feed_id)),
        (None, None) => match config.user_or(None) {
            Some(user_id) => Ok(ArticleSource::User(user_id)),
            None => bail!("Specify --feed, --user, or set a default user"),
        },
    }
}

async fn cmd_subscribe(client: &TldrfeedClient, config: &Config, args: SubscribeArgs) -> Result<()> {
    let user_id = config
        .user_or(args.user.as_deref())
        .context("No user specified and no default user set. Use --user <ID> or 'tldrfeed config set-user'.")?;

    let message = client
        .subscribe(&user_id, &args.feed)
        .await
        .context("Failed to subscribe")?;
    println!("{} {}", "✓".green(), message);

    Ok(())
}

fn cmd_config(mut config: Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  URL: {}", config.url);
            println!(
                "  Default User: {}",
                config.default_user.as_deref().unwrap_or("None").cyan()
            );
        }

        ConfigAction::SetUrl { url } => {
            config.url = url;
            config.save()?;
            println!("{} URL set to '{}'", "✓".green(), config.url);
        }

        ConfigAction::SetUser { user_id } => {
            config.default_user = Some(user_id);
            config.save()?;
            println!("{} Default user saved", "✓".green());
        }
    }

    Ok(())
}

fn print_article(article: &Article) {
    println!(
        "  {} {}",
        article.published_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        article.title.cyan().bold()
    );
    println!("    {}", truncate_string(&article.body, 80));
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_article() {
        let cli = Cli::try_parse_from([
            "tldrfeed", "create", "article", "-f", "feed-1", "-t", "Title", "-b", "Body",
            "--url", "http://feeds:8080",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://feeds:8080"));
        match cli.command {
            Commands::Create {
                action: CreateAction::Article(args),
            } => {
                assert_eq!(args.feed, "feed-1");
                assert_eq!(args.title, "Title");
                assert_eq!(args.body, "Body");
            }
            _ => panic!("expected create article"),
        }
    }

    #[test]
    fn test_parse_get_user_feed() {
        let cli = Cli::try_parse_from(["tldrfeed", "get", "feed", "f-1", "--user", "u-1"]).unwrap();

        match cli.command {
            Commands::Get {
                action: GetAction::Feed { id, user },
            } => {
                assert_eq!(id, "f-1");
                assert_eq!(user.as_deref(), Some("u-1"));
            }
            _ => panic!("expected get feed"),
        }
    }

    fn config_with_default_user() -> Config {
        Config {
            default_user: Some("u-default".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_article_source_feed_ignores_default_user() {
        let source = article_source(Some("f-1".to_string()), None, &config_with_default_user()).unwrap();
        assert_eq!(source, ArticleSource::Feed("f-1".to_string()));
    }

    #[test]
    fn test_article_source_explicit_user() {
        let config = config_with_default_user();

        assert_eq!(
            article_source(None, Some("u-1".to_string()), &config).unwrap(),
            ArticleSource::User("u-1".to_string())
        );
        assert_eq!(
            article_source(Some("f-1".to_string()), Some("u-1".to_string()), &config).unwrap(),
            ArticleSource::UserFeed("u-1".to_string(), "f-1".to_string())
        );
    }

    #[test]
    fn test_article_source_falls_back_to_default_user() {
        assert_eq!(
            article_source(None, None, &config_with_default_user()).unwrap(),
            ArticleSource::User("u-default".to_string())
        );
        assert!(article_source(None, None, &Config::default()).is_err());
    }

    #[test]
    fn test_parse_list_feeds_without_user() {
        let cli = Cli::try_parse_from(["tldrfeed", "list", "feeds"]).unwrap();

        match cli.command {
            Commands::List {
                action: ListAction::Feeds { user },
            } => assert_eq!(user, None),
            _ => panic!("expected list feeds"),
        }
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("абвгд", 3), "абв...");
    }
}
