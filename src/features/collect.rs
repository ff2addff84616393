//! Aggregation across feeds: collection, recency ordering, paging and search.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;
use tracing::info;

use super::resolve::SummaryResolver;
use crate::clients::FeedFetcher;
use crate::core::config::{AppConfig, DEFAULT_MAX_CONCURRENCY};
use crate::core::models::{FeedEntry, FeedSource, RecentPage, ResolvedEntry};
use crate::utils::filters::title_matches;

#[derive(Debug, Clone, Copy)]
pub struct AggregatorOptions {
    /// Entries resolved concurrently.
    pub max_concurrency: usize,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl From<&AppConfig> for AggregatorOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
        }
    }
}

pub struct Aggregator {
    feeds: Vec<FeedSource>,
    feed_fetcher: Arc<dyn FeedFetcher>,
    resolver: Arc<SummaryResolver>,
    options: AggregatorOptions,
}

impl Aggregator {
    pub fn new(
        feeds: Vec<FeedSource>,
        feed_fetcher: Arc<dyn FeedFetcher>,
        resolver: Arc<SummaryResolver>,
        options: AggregatorOptions,
    ) -> Self {
        Self {
            feeds,
            feed_fetcher,
            resolver,
            options,
        }
    }

    /// Every entry of every feed, resolved, in feed order then entry order.
    pub async fn collect(&self) -> Vec<ResolvedEntry> {
        let entries = self.gather().await;
        self.resolve_all(entries).await
    }

    /// Page `page` (1-indexed) of all entries, newest first.
    ///
    /// Entries without a publication date sort after dated ones. Only the
    /// entries on the requested page are resolved.
    pub async fn list_recent(&self, page: usize, per_page: usize) -> RecentPage {
        let mut entries = self.gather().await;
        sort_by_recency(&mut entries, |(_, entry)| entry.published_at.as_ref());

        let window = PageWindow::new(entries.len(), page, per_page);
        let on_page: Vec<_> = entries.drain(window.range.clone()).collect();
        let resolved = self.resolve_all(on_page).await;

        info!(
            page = window.page,
            total_pages = window.total_pages,
            total_entries = window.total_entries,
            "Listed recent entries"
        );

        RecentPage {
            entries: resolved,
            page: window.page,
            per_page: window.per_page,
            total_pages: window.total_pages,
            total_entries: window.total_entries,
        }
    }

    /// Entries whose title contains `query` (ignoring case), in collection order.
    pub async fn search(&self, query: &str) -> Vec<ResolvedEntry> {
        let matching: Vec<_> = self
            .gather()
            .await
            .into_iter()
            .filter(|(_, entry)| title_matches(&entry.title, query))
            .collect();

        info!(query = %query, matches = matching.len(), "Searched entry titles");
        self.resolve_all(matching).await
    }

    /// Fetch all feeds concurrently, keeping configured feed order.
    async fn gather(&self) -> Vec<(String, FeedEntry)> {
        let fetches = self.feeds.iter().map(|feed| async move {
            let entries = self.feed_fetcher.fetch(&feed.url).await;
            info!(source = %feed.name, entries = entries.len(), "Collected feed");
            (feed.name.clone(), entries)
        });

        join_all(fetches)
            .await
            .into_iter()
            .flat_map(|(name, entries)| entries.into_iter().map(move |e| (name.clone(), e)))
            .collect()
    }

    /// Resolve each entry once with bounded concurrency; output keeps input order.
    async fn resolve_all(&self, entries: Vec<(String, FeedEntry)>) -> Vec<ResolvedEntry> {
        let limit = self.options.max_concurrency.max(1);

        let mut resolved: Vec<(usize, ResolvedEntry)> = stream::iter(entries.into_iter().enumerate())
            .map(|(index, (source_name, entry))| {
                let resolver = Arc::clone(&self.resolver);
                async move {
                    let resolution = resolver.resolve(&entry).await;
                    (
                        index,
                        ResolvedEntry {
                            source_name,
                            entry,
                            summary: resolution.summary,
                            summary_source: resolution.source,
                        },
                    )
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        resolved.sort_by_key(|(index, _)| *index);
        resolved.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Stable sort, newest first; undated items go last.
pub fn sort_by_recency<T, F>(items: &mut [T], published_at: F)
where
    F: Fn(&T) -> Option<&DateTime<Utc>>,
{
    items.sort_by(|a, b| match (published_at(a), published_at(b)) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Which slice of a sorted list a page covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
    pub range: Range<usize>,
}

impl PageWindow {
    /// `page` and `per_page` below 1 are treated as 1. A page past the end
    /// has an empty range.
    ///
    /// `total_pages` is `total / per_page + 1`, so an exact multiple reports
    /// one trailing empty page.
    pub fn new(total_entries: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);

        let start = (page - 1).saturating_mul(per_page).min(total_entries);
        let end = start.saturating_add(per_page).min(total_entries);

        Self {
            page,
            per_page,
            total_pages: total_entries / per_page + 1,
            total_entries,
            range: start..end,
        }
    }
}
