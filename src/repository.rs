//! Best-effort news queries over the API, the offline cache, and the
//! bundled samples.
//!
//! Two policies coexist by design. The main-feed queries (`latest`,
//! `trending`, `business`) are infallible: a failure degrades to cached
//! articles or bundled samples, so those screens always have something to
//! show. The explicit queries (`by category`, `search`) surface classified
//! API errors instead of masking them with fake data, because an empty
//! result there is legitimate — with the one exception that rate limiting
//! (429) is swallowed as a retry-later signal rather than raised.

use crate::api::{ApiError, NewsApi};
use crate::cache::ArticleCache;
use crate::language;
use crate::model::{Article, NewsResponse};
use crate::sample;
use crate::storage::Settings;

#[derive(Clone)]
pub struct NewsRepository {
    api: NewsApi,
    cache: ArticleCache,
    settings: Settings,
}

impl NewsRepository {
    pub fn new(api: NewsApi, cache: ArticleCache, settings: Settings) -> Self {
        Self {
            api,
            cache,
            settings,
        }
    }

    /// Map the stored UI language preference to the API language and the
    /// country the API expects with it.
    async fn resolve_locale(&self) -> (&'static str, &'static str) {
        let ui_language = self.settings.language().await;
        let api_language = language::resolve_api_language(&ui_language);
        let country = language::resolve_country(api_language);
        tracing::debug!(
            ui_language = %ui_language,
            api_language = %api_language,
            country = %country,
            "Resolved query locale"
        );
        (api_language, country)
    }

    /// Never-empty policy for the main-feed queries.
    ///
    /// Success writes through to the offline cache and returns the fetched
    /// list. A null body or an HTTP-level failure degrades straight to
    /// `fallback`; a transport failure (no well-formed response) prefers the
    /// offline cache when it has anything, then `fallback`.
    async fn with_fallback(
        &self,
        query: &'static str,
        result: Result<Option<NewsResponse>, ApiError>,
        fallback: Vec<Article>,
    ) -> Vec<Article> {
        match result {
            Ok(Some(response)) => {
                tracing::debug!(query = query, count = response.results.len(), "Fetched articles");
                self.cache.save_articles(response.results.clone()).await;
                response.results
            }
            Ok(None) => {
                tracing::warn!(query = query, "API response body was null, using bundled samples");
                fallback
            }
            Err(e) if e.is_transport() => {
                let cached = self.cache.cached_articles();
                if cached.is_empty() {
                    tracing::warn!(query = query, error = %e, "Offline with empty cache, using bundled samples");
                    fallback
                } else {
                    tracing::warn!(query = query, error = %e, count = cached.len(), "Offline, serving cached articles");
                    cached
                }
            }
            Err(e) => {
                tracing::error!(query = query, error = %e, "API call failed, using bundled samples");
                fallback
            }
        }
    }

    /// Surface-the-error policy for category and search queries.
    ///
    /// Rate limiting is the one classified failure that is not raised; it
    /// resolves to an empty list so the caller retries later instead of
    /// rendering an error state.
    fn surface_errors(
        &self,
        query: &'static str,
        result: Result<Option<NewsResponse>, ApiError>,
    ) -> Result<Vec<Article>, ApiError> {
        match result {
            Ok(Some(response)) => {
                tracing::debug!(query = query, count = response.results.len(), "Fetched articles");
                Ok(response.results)
            }
            Ok(None) => {
                tracing::warn!(query = query, "API response body was null");
                Ok(Vec::new())
            }
            Err(ApiError::RateLimited) => {
                tracing::warn!(query = query, "Rate limited; treating as retry-later, not an error");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::error!(query = query, error = %e, "API call failed");
                Err(e)
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Latest headlines for the user's locale. Infallible: degrades to
    /// cached articles, then bundled samples.
    pub async fn latest_news(&self) -> Vec<Article> {
        let (lang, country) = self.resolve_locale().await;
        let result = self.api.latest(lang, country).await;
        self.with_fallback("latest", result, sample::articles()).await
    }

    /// Top stories. Same fallback policy as [`latest_news`](Self::latest_news).
    pub async fn trending_news(&self) -> Vec<Article> {
        let (lang, _) = self.resolve_locale().await;
        let result = self.api.trending(lang).await;
        self.with_fallback("trending", result, sample::articles()).await
    }

    /// Business headlines; falls back to the business slice of the samples.
    pub async fn business_news(&self) -> Vec<Article> {
        let (lang, _) = self.resolve_locale().await;
        let result = self.api.business(lang).await;
        self.with_fallback("business", result, sample::category_articles("business"))
            .await
    }

    /// Articles for one category. Errors are surfaced (except 429); results
    /// are not written to the offline cache.
    pub async fn news_by_category(&self, category: &str) -> Result<Vec<Article>, ApiError> {
        let (lang, _) = self.resolve_locale().await;
        let result = self.api.by_category(category, lang).await;
        self.surface_errors("category", result)
    }

    /// Full-text search. Same policy as category queries.
    pub async fn search_news(&self, query: &str) -> Result<Vec<Article>, ApiError> {
        let (lang, _) = self.resolve_locale().await;
        let result = self.api.search(query, lang).await;
        self.surface_errors("search", result)
    }

    /// Look an article up by ID in the offline cache and bookmarks.
    ///
    /// The API has no single-article endpoint, so this never goes to the
    /// network; `None` means the article is in neither collection.
    pub fn article_by_id(&self, article_id: &str) -> Option<Article> {
        self.cache.find_article_by_id(article_id)
    }
}
