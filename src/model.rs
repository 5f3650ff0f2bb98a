//! Wire types for the NewsData.io `/news` endpoint.
//!
//! Field names follow the API's JSON (`article_id`, `pubDate`, `creator`, ...)
//! via serde renames so the Rust side can use conventional names. Unknown
//! fields in responses are ignored.

use serde::{Deserialize, Serialize};

/// Top-level response envelope for `GET /news`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub status: String,
    #[serde(rename = "totalResults", default)]
    pub total_results: i64,
    #[serde(default)]
    pub results: Vec<Article>,
    /// Pagination cursor. Parsed for completeness; the core does not page.
    #[serde(rename = "nextPage", default)]
    pub next_page: Option<String>,
}

/// One news item as delivered by the API.
///
/// `id` is the sole identity key: two articles with the same `id` are the
/// same article everywhere in the cache, regardless of other field
/// differences. Timestamps stay in the source's `"YYYY-MM-DD HH:MM:SS"`
/// string form; nothing in the core orders by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "article_id")]
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "pubDate")]
    pub published_at: String,
    #[serde(rename = "image_url", default)]
    pub image_url: Option<String>,
    pub source_id: String,
    pub source_priority: i64,
    pub source_name: String,
    pub source_url: String,
    #[serde(rename = "source_icon", default)]
    pub source_icon: Option<String>,
    pub language: String,
    #[serde(rename = "country", default)]
    pub countries: Vec<String>,
    #[serde(rename = "category", default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(rename = "creator", default)]
    pub creators: Option<Vec<String>>,
    #[serde(rename = "ai_tag", default)]
    pub ai_tag: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub duplicate: Option<bool>,
}

impl Article {
    /// Estimated reading time in whole minutes, from content length at
    /// `chars_per_minute` (see `Config::chars_per_minute`). Heuristic, not
    /// an invariant; articles without content read as one minute.
    pub fn reading_time_minutes(&self, chars_per_minute: u32) -> u32 {
        let chars = self.content.as_deref().map_or(0, |c| c.chars().count());
        let cpm = chars_per_minute.max(1) as usize;
        (chars / cpm).max(1) as u32
    }
}
