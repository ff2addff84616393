//! Feed download and parsing.
//!
//! RSS 0.9x/1.0/2.0, Atom and JSON Feed are all handled by `feed-rs`.

use async_trait::async_trait;
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use super::FeedFetcher;
use crate::core::config::AppConfig;
use crate::core::models::FeedEntry;
use crate::errors::BriefError;

#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, BriefError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, BriefError> {
        Self::new(config.fetch_timeout, &config.user_agent)
    }

    async fn download(&self, feed_url: &str) -> Result<Vec<FeedEntry>, BriefError> {
        let response = self.client.get(feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BriefError::FeedError(format!("HTTP {} for {}", status, feed_url)));
        }

        let bytes = response.bytes().await?;
        parse_entries(&bytes)
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, feed_url: &str) -> Vec<FeedEntry> {
        match self.download(feed_url).await {
            Ok(entries) => {
                info!(url = %feed_url, entries = entries.len(), "Fetched feed");
                entries
            }
            Err(e) => {
                warn!(url = %feed_url, error = %e, "Skipping feed");
                Vec::new()
            }
        }
    }
}

/// Parse a feed document into entries, in feed order.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<FeedEntry>, BriefError> {
    let feed = parser::parse(bytes)?;
    Ok(feed.entries.into_iter().map(to_feed_entry).collect())
}

fn to_feed_entry(entry: Entry) -> FeedEntry {
    let title = entry.title.map(|t| t.content).unwrap_or_default();

    let link = entry
        .links
        .iter()
        .find(|l| !l.href.trim().is_empty())
        .map(|l| l.href.trim().to_string())
        .unwrap_or_default();

    let embedded_content = entry
        .content
        .and_then(|c| c.body)
        .filter(|body| !body.trim().is_empty())
        .into_iter()
        .collect();

    FeedEntry {
        title,
        link,
        published_at: entry.published.or(entry.updated),
        embedded_content,
        description: entry.summary.map(|s| s.content),
    }
}
