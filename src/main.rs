use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newsstand::model::Article;
use newsstand::{language, ArticleCache, Config, KvStore, NewsApi, NewsRepository, Settings};

/// Get the config directory path (~/.config/newsstand/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsstand"))
}

#[derive(Parser, Debug)]
#[command(name = "newsstand", about = "Offline-first NewsData.io reader")]
struct Args {
    /// Path to the article store (defaults to ~/.config/newsstand/newsstand.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.config/newsstand/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest headlines for your language
    Latest,
    /// Top stories
    Trending,
    /// Business headlines
    Business,
    /// Headlines for one category
    Category { category: String },
    /// Full-text search
    Search { query: String },
    /// Show a cached article and mark it read
    Read { article_id: String },
    /// List bookmarked articles
    Bookmarks,
    /// Bookmark a cached article
    Bookmark { article_id: String },
    /// Remove a bookmark
    Unbookmark { article_id: String },
    /// Recently read articles
    History,
    /// Reading statistics
    Stats,
    /// Show or change the UI language
    Language { code: Option<String> },
}

fn print_articles(articles: &[Article], chars_per_minute: u32) {
    if articles.is_empty() {
        println!("No articles.");
        return;
    }
    for article in articles {
        println!(
            "{:>7} min  {}  [{}]",
            article.reading_time_minutes(chars_per_minute),
            article.title,
            article.id
        );
        println!("           {} | {}", article.source_name, article.published_at);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access: the store holds reading history, the config an API key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(&config_dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o700);
            if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to set config directory permissions to 0700"
                );
            }
        }
    }

    let config_path = args
        .config
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let db_path = args.db.unwrap_or_else(|| config_dir.join("newsstand.db"));
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;

    let store = KvStore::open(db_path_str)
        .await
        .context("Failed to open article store")?;
    let settings = Settings::new(store.clone());
    let cache = ArticleCache::hydrate(store).await;
    let api = NewsApi::new(&config).context("Failed to build API client")?;
    let repo = NewsRepository::new(api, cache.clone(), settings.clone());

    let cpm = config.chars_per_minute;

    match args.command {
        Command::Latest => print_articles(&repo.latest_news().await, cpm),
        Command::Trending => print_articles(&repo.trending_news().await, cpm),
        Command::Business => print_articles(&repo.business_news().await, cpm),
        Command::Category { category } => {
            let articles = repo
                .news_by_category(&category)
                .await
                .context("Category query failed")?;
            print_articles(&articles, cpm);
        }
        Command::Search { query } => {
            let articles = repo.search_news(&query).await.context("Search failed")?;
            print_articles(&articles, cpm);
        }
        Command::Read { article_id } => match repo.article_by_id(&article_id) {
            Some(article) => {
                println!("{}", article.title);
                println!("{} | {}", article.source_name, article.published_at);
                println!();
                if let Some(body) = article.content.as_deref().or(article.description.as_deref()) {
                    println!("{}", body);
                }
                println!();
                println!("{}", article.link);
                cache.add_to_reading_history(&article_id).await;
                settings
                    .record_article_read()
                    .await
                    .context("Failed to record reading stats")?;
            }
            None => {
                eprintln!("Article '{}' is not in the offline cache.", article_id);
                std::process::exit(1);
            }
        },
        Command::Bookmarks => {
            let bookmarks = cache.bookmarked_articles().borrow().clone();
            print_articles(&bookmarks, cpm);
        }
        Command::Bookmark { article_id } => match repo.article_by_id(&article_id) {
            Some(article) => {
                cache.bookmark_article(article).await;
                println!("Bookmarked {}.", article_id);
            }
            None => {
                eprintln!("Article '{}' is not in the offline cache.", article_id);
                std::process::exit(1);
            }
        },
        Command::Unbookmark { article_id } => {
            cache.remove_bookmark(&article_id).await;
            println!("Removed bookmark {}.", article_id);
        }
        Command::History => print_articles(&cache.recently_read_articles(), cpm),
        Command::Stats => {
            let stats = settings.reading_stats().await;
            println!("Articles read:  {}", stats.articles_read);
            println!("Reading streak: {} day(s)", stats.reading_streak);
        }
        Command::Language { code } => match code {
            Some(code) => {
                if !language::is_supported(&code) {
                    eprintln!("Unsupported language code '{}'. Run without an argument to list codes.", code);
                    std::process::exit(1);
                }
                settings
                    .set_language(&code)
                    .await
                    .context("Failed to set language")?;
                println!("Language set to {} ({}).", code, language::display_name(&code));
            }
            None => {
                let current = settings.language().await;
                println!("Current: {} ({})", current, language::display_name(&current));
                println!();
                for (code, native) in language::SUPPORTED_LANGUAGES {
                    println!("  {:<5} {}", code, native);
                }
            }
        },
    }

    Ok(())
}
