//! Client modules for feeds and article pages

pub mod feed_client;
pub mod page_client;
pub mod rate_limited;

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::models::FeedEntry;
use crate::errors::BriefError;

pub use feed_client::HttpFeedFetcher;
pub use page_client::HttpPageFetcher;
pub use rate_limited::RateLimitedPageFetcher;

/// Raw response from a page fetch. Any status is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Loads and parses one feed.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Entries of the feed at `feed_url`, in feed order.
    ///
    /// Never fails: download or parse problems are logged and yield no entries.
    async fn fetch(&self, feed_url: &str) -> Vec<FeedEntry>;
}

/// Performs a GET for an article page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedPage, BriefError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn get(&self, url: &str) -> Result<FetchedPage, BriefError> {
        (**self).get(url).await
    }
}
