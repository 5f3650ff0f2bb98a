//! Offline article cache: the single source of truth for cached articles,
//! bookmarks, and reading history.
//!
//! Three collections live in memory behind watch channels and write through
//! to the key-value store as JSON blobs. Store failures never propagate:
//! reads degrade to empty collections and write failures are logged, so
//! offline functionality can never block a caller.
//!
//! Collections are most-recent-first. `cached_articles` merges every
//! successful fetch with first-seen-wins identity on the article ID and is
//! bounded to [`MAX_CACHED_ARTICLES`]; `reading_history` holds deduplicated
//! article IDs bounded to [`MAX_READING_HISTORY`]; bookmarks are unbounded
//! and user-curated.

use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::model::Article;
use crate::sample;
use crate::storage::KvStore;

/// Upper bound on the offline article cache.
pub const MAX_CACHED_ARTICLES: usize = 200;
/// Upper bound on the reading-history ID list.
pub const MAX_READING_HISTORY: usize = 100;
/// How many history entries `recently_read_articles` resolves.
const RECENTLY_READ_WINDOW: usize = 20;

const CACHED_KEY: &str = "cached_articles";
const BOOKMARKS_KEY: &str = "bookmarked_articles";
const HISTORY_KEY: &str = "reading_history";

async fn load_collection<T: DeserializeOwned>(store: &KvStore, key: &str) -> Vec<T> {
    let blob = match store.get(key).await {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Store read failed, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&blob) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Corrupt collection blob, resetting to empty");
            Vec::new()
        }
    }
}

/// One cache instance is constructed at startup and handed by clone to the
/// repository and to presentation-layer consumers; clones share state.
#[derive(Clone)]
pub struct ArticleCache {
    store: KvStore,
    cached: Arc<watch::Sender<Vec<Article>>>,
    bookmarks: Arc<watch::Sender<Vec<Article>>>,
    history: Arc<watch::Sender<Vec<String>>>,
    // Serializes all read-modify-write mutations, held across the persist
    // await so a mutation is durable before the next one starts.
    write_lock: Arc<Mutex<()>>,
}

impl ArticleCache {
    /// Load all three collections from the store.
    ///
    /// Each collection hydrates independently; a corrupt or unreadable blob
    /// resets just that collection. If the article cache comes up empty
    /// (fresh install, wiped store, corrupt blob) it is seeded with the
    /// bundled samples and the seed is persisted, so a first run never shows
    /// an empty feed.
    pub async fn hydrate(store: KvStore) -> Self {
        let bookmarks = load_collection::<Article>(&store, BOOKMARKS_KEY).await;
        let history = load_collection::<String>(&store, HISTORY_KEY).await;
        let cached = load_collection::<Article>(&store, CACHED_KEY).await;

        tracing::debug!(
            cached = cached.len(),
            bookmarks = bookmarks.len(),
            history = history.len(),
            "Hydrated article cache"
        );

        let cache = Self {
            store,
            cached: Arc::new(watch::channel(cached).0),
            bookmarks: Arc::new(watch::channel(bookmarks).0),
            history: Arc::new(watch::channel(history).0),
            write_lock: Arc::new(Mutex::new(())),
        };

        if cache.cached.borrow().is_empty() {
            let seed = sample::articles();
            tracing::info!(count = seed.len(), "Seeding empty article cache with bundled samples");
            cache.cached.send_replace(seed);
            cache.persist_collection(CACHED_KEY, &cache.snapshot(&cache.cached)).await;
        }

        cache
    }

    fn snapshot<T: Clone>(&self, tx: &watch::Sender<Vec<T>>) -> Vec<T> {
        tx.borrow().clone()
    }

    async fn persist_collection<T: Serialize>(&self, key: &str, items: &[T]) {
        let blob = match serde_json::to_string(items) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to serialize collection");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &blob).await {
            tracing::warn!(key = %key, error = %e, "Store write failed; collection kept in memory only");
        }
    }

    // ========================================================================
    // Cached Articles
    // ========================================================================

    /// Merge fetched articles into the offline cache.
    ///
    /// Incoming articles whose ID is already cached are dropped
    /// (first-seen-wins: a refetch never replaces the cached copy). The
    /// remaining ones are prepended in their incoming order, the collection
    /// is truncated to [`MAX_CACHED_ARTICLES`] from the tail, and the result
    /// is persisted before this returns.
    pub async fn save_articles(&self, incoming: Vec<Article>) {
        let _guard = self.write_lock.lock().await;

        let mut merged = self.snapshot(&self.cached);
        let mut seen: HashSet<String> = merged.iter().map(|a| a.id.clone()).collect();
        let fresh: Vec<Article> = incoming
            .into_iter()
            .filter(|a| seen.insert(a.id.clone()))
            .collect();

        let added = fresh.len();
        merged.splice(0..0, fresh);
        merged.truncate(MAX_CACHED_ARTICLES);
        let total = merged.len();

        self.cached.send_replace(merged);
        self.persist_collection(CACHED_KEY, &self.snapshot(&self.cached)).await;

        tracing::debug!(added = added, total = total, "Merged fetched articles into cache");
    }

    /// Snapshot of the offline cache, most-recent-first.
    pub fn cached_articles(&self) -> Vec<Article> {
        self.snapshot(&self.cached)
    }

    // ========================================================================
    // Bookmarks
    // ========================================================================

    /// Bookmark an article. Idempotent: a second call with the same ID is a
    /// no-op.
    pub async fn bookmark_article(&self, article: Article) {
        let _guard = self.write_lock.lock().await;

        if self.bookmarks.borrow().iter().any(|a| a.id == article.id) {
            return;
        }

        let mut list = self.snapshot(&self.bookmarks);
        list.insert(0, article);
        self.bookmarks.send_replace(list);
        self.persist_collection(BOOKMARKS_KEY, &self.snapshot(&self.bookmarks)).await;
    }

    /// Remove a bookmark by article ID. No-op (and no persist) if absent.
    pub async fn remove_bookmark(&self, article_id: &str) {
        let _guard = self.write_lock.lock().await;

        let mut list = self.snapshot(&self.bookmarks);
        let before = list.len();
        list.retain(|a| a.id != article_id);
        if list.len() == before {
            return;
        }

        self.bookmarks.send_replace(list);
        self.persist_collection(BOOKMARKS_KEY, &self.snapshot(&self.bookmarks)).await;
    }

    /// Synchronous membership check against the current bookmark list.
    pub fn is_bookmarked(&self, article_id: &str) -> bool {
        self.bookmarks.borrow().iter().any(|a| a.id == article_id)
    }

    pub async fn clear_all_bookmarks(&self) {
        let _guard = self.write_lock.lock().await;
        self.bookmarks.send_replace(Vec::new());
        self.persist_collection(BOOKMARKS_KEY, &Vec::<Article>::new()).await;
    }

    /// Live view of the bookmark list. Subscribing yields the current value
    /// immediately, then every subsequent change.
    pub fn bookmarked_articles(&self) -> watch::Receiver<Vec<Article>> {
        self.bookmarks.subscribe()
    }

    // ========================================================================
    // Reading History
    // ========================================================================

    /// Record that an article was opened. Re-reading moves the ID to the
    /// front instead of duplicating it; the list is capped at
    /// [`MAX_READING_HISTORY`].
    pub async fn add_to_reading_history(&self, article_id: &str) {
        let _guard = self.write_lock.lock().await;

        let mut history = self.snapshot(&self.history);
        history.retain(|id| id != article_id);
        history.insert(0, article_id.to_string());
        history.truncate(MAX_READING_HISTORY);

        self.history.send_replace(history);
        self.persist_collection(HISTORY_KEY, &self.snapshot(&self.history)).await;
    }

    /// Live view of the reading-history ID list, most-recent-first.
    pub fn reading_history(&self) -> watch::Receiver<Vec<String>> {
        self.history.subscribe()
    }

    /// Resolve the most recent history entries to full articles.
    ///
    /// Looks at the first [`RECENTLY_READ_WINDOW`] history IDs and resolves
    /// each against the cache, then the bookmarks. IDs that no longer match
    /// any stored article are skipped, so the result may be shorter than the
    /// window.
    pub fn recently_read_articles(&self) -> Vec<Article> {
        let history = self.history.borrow();
        let cached = self.cached.borrow();
        let bookmarks = self.bookmarks.borrow();

        history
            .iter()
            .take(RECENTLY_READ_WINDOW)
            .filter_map(|id| {
                cached
                    .iter()
                    .find(|a| &a.id == id)
                    .or_else(|| bookmarks.iter().find(|a| &a.id == id))
                    .cloned()
            })
            .collect()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find an article by ID across the cache, then the bookmarks.
    ///
    /// The canonical lookup for screens opened by deep link or navigation.
    /// When both collections hold the ID, the cached copy wins.
    pub fn find_article_by_id(&self, article_id: &str) -> Option<Article> {
        if let Some(article) = self.cached.borrow().iter().find(|a| a.id == article_id) {
            return Some(article.clone());
        }
        if let Some(article) = self.bookmarks.borrow().iter().find(|a| a.id == article_id) {
            return Some(article.clone());
        }

        tracing::debug!(
            article_id = %article_id,
            cached = self.cached.borrow().len(),
            bookmarked = self.bookmarks.borrow().len(),
            "Article not found in cache or bookmarks"
        );
        None
    }
}
