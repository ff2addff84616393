use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder returned when no fallback step yields an acceptable summary.
pub const PLACEHOLDER_SUMMARY: &str = "No detailed summary available for this article.";

/// A configured feed: display name plus feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// One aggregated feed item, as produced by a feed fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Raw text/HTML blocks carried inside the entry itself (e.g. `content:encoded`).
    pub embedded_content: Vec<String>,
    /// Entry description or summary, usually HTML.
    pub description: Option<String>,
}

/// Which step of the fallback chain produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    EmbeddedContent,
    Description,
    LiveFetch,
    Placeholder,
}

/// An entry together with its source name and resolved summary.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEntry {
    pub source_name: String,
    pub entry: FeedEntry,
    pub summary: String,
    pub summary_source: SummarySource,
}

/// One page of the "recent items" view.
#[derive(Debug, Clone, Serialize)]
pub struct RecentPage {
    pub entries: Vec<ResolvedEntry>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
}
