//! Integration tests for the offline-first lifecycle: seed, fetch,
//! write-through, restart, offline fallback.
//!
//! Each test uses its own SQLite file in a temp directory so the
//! close-and-reopen steps exercise real persistence, not a shared pool.

use std::path::PathBuf;

use newsstand::{ArticleCache, Config, KvStore, NewsApi, NewsRepository, Settings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TempStore {
    dir: PathBuf,
}

impl TempStore {
    fn new(test_name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "newsstand_it_{}_{}",
            test_name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn db_path(&self) -> String {
        self.dir.join("newsstand.db").to_str().unwrap().to_string()
    }

    async fn open(&self) -> KvStore {
        KvStore::open(&self.db_path()).await.unwrap()
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn repo_config(base_url: &str) -> Config {
    Config {
        api_key: Some("pub_test_key".to_string()),
        base_url: base_url.to_string(),
        ..Config::default()
    }
}

fn fetch_body(ids: &[&str]) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{
                    "article_id": "{id}",
                    "title": "Article {id}",
                    "link": "https://example.com/{id}",
                    "pubDate": "2026-08-26 09:00:00",
                    "source_id": "wire",
                    "source_priority": 1,
                    "source_name": "Wire",
                    "source_url": "https://wire.example.com",
                    "language": "en",
                    "country": ["us"],
                    "category": ["top"]
                }}"#
            )
        })
        .collect();
    format!(
        r#"{{"status": "success", "totalResults": {}, "results": [{}]}}"#,
        ids.len(),
        results.join(",")
    )
}

#[tokio::test]
async fn fetched_articles_survive_restart_and_serve_offline() {
    let temp = TempStore::new("restart");

    // Session 1: cold start seeds samples, then a successful fetch writes
    // through to the store.
    {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(fetch_body(&["live-1", "live-2"])),
            )
            .mount(&server)
            .await;

        let store = temp.open().await;
        let settings = Settings::new(store.clone());
        let cache = ArticleCache::hydrate(store).await;
        assert_eq!(cache.cached_articles().len(), 6); // seeded

        let config = repo_config(&format!("{}/", server.uri()));
        let repo = NewsRepository::new(NewsApi::new(&config).unwrap(), cache.clone(), settings);

        let articles = repo.latest_news().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(cache.cached_articles().len(), 8);
    }

    // Session 2: reopen the same file with the network gone. The fetched
    // articles are still there and the repository serves them.
    {
        let store = temp.open().await;
        let settings = Settings::new(store.clone());
        let cache = ArticleCache::hydrate(store).await;

        let cached = cache.cached_articles();
        assert_eq!(cached.len(), 8);
        assert_eq!(cached[0].id, "live-1");

        let config = repo_config("http://127.0.0.1:1/");
        let repo = NewsRepository::new(NewsApi::new(&config).unwrap(), cache, settings);

        let offline = repo.latest_news().await;
        assert_eq!(offline.len(), 8);
        assert_eq!(offline[0].id, "live-1");
    }
}

#[tokio::test]
async fn bookmarks_history_and_stats_survive_restart() {
    let temp = TempStore::new("bookmarks");

    {
        let store = temp.open().await;
        let settings = Settings::new(store.clone());
        let cache = ArticleCache::hydrate(store).await;

        let article = cache.cached_articles()[0].clone();
        cache.bookmark_article(article.clone()).await;
        cache.add_to_reading_history(&article.id).await;
        settings.record_article_read().await.unwrap();
        settings.set_language("de").await.unwrap();
    }

    {
        let store = temp.open().await;
        let settings = Settings::new(store.clone());
        let cache = ArticleCache::hydrate(store).await;

        assert!(cache.is_bookmarked("sample-001"));
        assert_eq!(
            cache.reading_history().borrow().as_slice(),
            ["sample-001".to_string()]
        );

        let recent = cache.recently_read_articles();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, "sample-001");

        let stats = settings.reading_stats().await;
        assert_eq!(stats.articles_read, 1);
        assert_eq!(stats.reading_streak, 1);
        assert_eq!(settings.language().await, "de");
    }
}

#[tokio::test]
async fn repeated_fetches_dedupe_and_keep_first_copy() {
    let temp = TempStore::new("dedupe");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fetch_body(&["dup-1", "dup-2"])))
        .mount(&server)
        .await;

    let store = temp.open().await;
    let settings = Settings::new(store.clone());
    let cache = ArticleCache::hydrate(store).await;
    let config = repo_config(&format!("{}/", server.uri()));
    let repo = NewsRepository::new(NewsApi::new(&config).unwrap(), cache.clone(), settings);

    repo.latest_news().await;
    repo.latest_news().await;
    repo.trending_news().await;

    let cached = cache.cached_articles();
    assert_eq!(cached.len(), 8); // 6 samples + 2 fetched, no duplicates
    assert_eq!(
        cached.iter().filter(|a| a.id.starts_with("dup-")).count(),
        2
    );
}
