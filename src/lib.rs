//! Offline-first news reader core.
//!
//! Articles come from the NewsData.io `/news` endpoint and are merged into a
//! persistent, bounded offline cache backed by SQLite. Bookmarks and reading
//! history live in the same store and are exposed as watch channels so a UI
//! can observe changes without polling. When the network is down the
//! repository degrades to cached articles and finally to a bundled sample
//! dataset, so the main feed is never empty.
//!
//! Typical wiring:
//!
//! ```no_run
//! use newsstand::{ArticleCache, Config, KvStore, NewsApi, NewsRepository, Settings};
//!
//! # async fn wire() -> anyhow::Result<()> {
//! let config = Config::load(std::path::Path::new("config.toml"))?;
//! let store = KvStore::open("newsstand.db").await?;
//! let settings = Settings::new(store.clone());
//! let cache = ArticleCache::hydrate(store).await;
//! let api = NewsApi::new(&config)?;
//! let repo = NewsRepository::new(api, cache, settings);
//! let articles = repo.latest_news().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod language;
pub mod model;
pub mod repository;
pub mod sample;
pub mod storage;

pub use api::{ApiError, NewsApi};
pub use cache::ArticleCache;
pub use config::{Config, ConfigError};
pub use model::{Article, NewsResponse};
pub use repository::NewsRepository;
pub use storage::{KvStore, ReadingStats, Settings, StoreError};
