use chrono::{NaiveDate, Utc};

use super::kv::{KvStore, StoreError};
use crate::language;

// Dotted key convention: `settings.*` for user preferences, `stats.*` for
// reading bookkeeping.
const KEY_LANGUAGE: &str = "settings.language";
const KEY_THEME: &str = "settings.theme";
const KEY_FONT_SIZE: &str = "settings.font_size";
const KEY_PAGE_SIZE: &str = "settings.page_size";
const KEY_OFFLINE_READING: &str = "settings.offline_reading";
const KEY_ARTICLES_READ: &str = "stats.articles_read";
const KEY_READING_STREAK: &str = "stats.reading_streak";
const KEY_LAST_READ_DATE: &str = "stats.last_read_date";

/// Aggregated reading bookkeeping, shown on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingStats {
    pub articles_read: u64,
    /// Consecutive calendar days with at least one article read.
    pub reading_streak: u32,
}

/// Typed accessors for the user-settings namespace of the store.
///
/// Reads degrade to defaults when the store fails or holds an unparseable
/// value; only writes surface errors. The repository reads `language()`
/// before every fetch, everything else is presentation-layer preference.
#[derive(Clone)]
pub struct Settings {
    store: KvStore,
}

impl Settings {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    async fn get_or(&self, key: &str, default: &str) -> String {
        match self.store.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Settings read failed, using default");
                default.to_string()
            }
        }
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    /// UI language preference (ISO 639-1 code). Defaults to `"en"`.
    pub async fn language(&self) -> String {
        self.get_or(KEY_LANGUAGE, language::DEFAULT_LANGUAGE).await
    }

    /// Set the UI language. Unsupported codes are rejected.
    pub async fn set_language(&self, code: &str) -> Result<(), StoreError> {
        if !language::is_supported(code) {
            tracing::warn!(code = %code, "Ignoring unsupported language code");
            return Ok(());
        }
        self.store.set(KEY_LANGUAGE, code).await
    }

    pub async fn theme(&self) -> String {
        self.get_or(KEY_THEME, "system").await
    }

    pub async fn set_theme(&self, theme: &str) -> Result<(), StoreError> {
        self.store.set(KEY_THEME, theme).await
    }

    pub async fn font_size(&self) -> String {
        self.get_or(KEY_FONT_SIZE, "medium").await
    }

    pub async fn set_font_size(&self, size: &str) -> Result<(), StoreError> {
        self.store.set(KEY_FONT_SIZE, size).await
    }

    /// Requested page size for API queries. Defaults to 10.
    pub async fn page_size(&self) -> u32 {
        self.get_or(KEY_PAGE_SIZE, "10")
            .await
            .parse()
            .unwrap_or(10)
    }

    pub async fn set_page_size(&self, size: u32) -> Result<(), StoreError> {
        self.store.set(KEY_PAGE_SIZE, &size.to_string()).await
    }

    pub async fn offline_reading(&self) -> bool {
        self.get_or(KEY_OFFLINE_READING, "true").await == "true"
    }

    pub async fn set_offline_reading(&self, enabled: bool) -> Result<(), StoreError> {
        self.store
            .set(KEY_OFFLINE_READING, if enabled { "true" } else { "false" })
            .await
    }

    /// All stored settings as (key, value) pairs, ordered by key.
    pub async fn all(&self) -> Result<Vec<(String, String)>, StoreError> {
        self.store.get_by_prefix("settings.").await
    }

    // ========================================================================
    // Reading Statistics
    // ========================================================================

    /// Record that the user finished reading an article today.
    ///
    /// Increments the lifetime counter and extends the consecutive-day
    /// streak: a read on the day after the last one grows the streak, a gap
    /// resets it to 1, repeat reads on the same day leave it unchanged.
    pub async fn record_article_read(&self) -> Result<(), StoreError> {
        self.record_article_read_on(Utc::now().date_naive()).await
    }

    pub(crate) async fn record_article_read_on(&self, today: NaiveDate) -> Result<(), StoreError> {
        let read: u64 = self
            .get_or(KEY_ARTICLES_READ, "0")
            .await
            .parse()
            .unwrap_or(0);
        self.store
            .set(KEY_ARTICLES_READ, &(read + 1).to_string())
            .await?;

        let last_read = self
            .get_or(KEY_LAST_READ_DATE, "")
            .await
            .parse::<NaiveDate>()
            .ok();
        if last_read == Some(today) {
            return Ok(());
        }

        let streak: u32 = self
            .get_or(KEY_READING_STREAK, "0")
            .await
            .parse()
            .unwrap_or(0);
        let next_streak = match last_read {
            Some(last) if today.signed_duration_since(last).num_days() == 1 => streak + 1,
            _ => 1,
        };
        self.store
            .set(KEY_READING_STREAK, &next_streak.to_string())
            .await?;
        self.store
            .set(KEY_LAST_READ_DATE, &today.to_string())
            .await
    }

    pub async fn reading_stats(&self) -> ReadingStats {
        ReadingStats {
            articles_read: self
                .get_or(KEY_ARTICLES_READ, "0")
                .await
                .parse()
                .unwrap_or(0),
            reading_streak: self
                .get_or(KEY_READING_STREAK, "0")
                .await
                .parse()
                .unwrap_or(0),
        }
    }
}
