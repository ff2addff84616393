//! Shared fixtures: in-memory feed and page fetchers that record their calls.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use newsbrief::clients::{FeedFetcher, FetchedPage, PageFetcher};
use newsbrief::core::models::FeedEntry;
use newsbrief::errors::BriefError;
use newsbrief::features::SummaryResolver;
use newsbrief::summarizer::{Summarizer, SummarizerConfig};

pub const ARTICLE_PARAGRAPHS: [&str; 4] = [
    "The central bank left its benchmark interest rate unchanged on Wednesday, citing steady progress on inflation.",
    "Officials said the labor market remained strong and consumer spending continued to grow at a moderate pace.",
    "Several policymakers signaled that interest rate cuts could begin later this year if inflation keeps cooling.",
    "Markets rallied after the announcement, with bond yields falling and major stock indexes closing higher.",
];

/// Plain article text as the extractor should produce it.
pub fn article_text() -> String {
    ARTICLE_PARAGRAPHS.join(" ")
}

/// A full article page wrapped in typical boilerplate.
pub fn article_page() -> String {
    let paragraphs: String = ARTICLE_PARAGRAPHS
        .iter()
        .map(|p| format!("<p>{p}</p>"))
        .collect();
    format!(
        "<html><head><title>Rates</title><style>p {{ color: red }}</style></head>\
         <body><header><p>Subscribe now for unlimited access to all of our premium coverage.</p></header>\
         <nav>Home | Markets | Tech</nav>\
         <article>{paragraphs}</article>\
         <script>trackPageView('rates');</script>\
         <footer><p>Copyright 2025 Example Media Group. All rights reserved worldwide.</p></footer>\
         </body></html>"
    )
}

pub fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        link: link.to_string(),
        ..FeedEntry::default()
    }
}

pub fn summarizer() -> Arc<Summarizer> {
    Arc::new(Summarizer::new(&SummarizerConfig::default()).expect("default summarizer"))
}

pub fn resolver(pages: Arc<MockPageFetcher>) -> SummaryResolver {
    SummaryResolver::new(summarizer(), pages)
}

/// Feed fetcher serving fixed entries per URL; unknown URLs yield nothing.
#[derive(Default)]
pub struct StaticFeedFetcher {
    feeds: HashMap<String, Vec<FeedEntry>>,
    pub calls: Mutex<Vec<String>>,
}

impl StaticFeedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }
}

#[async_trait]
impl FeedFetcher for StaticFeedFetcher {
    async fn fetch(&self, feed_url: &str) -> Vec<FeedEntry> {
        self.calls.lock().unwrap().push(feed_url.to_string());
        self.feeds.get(feed_url).cloned().unwrap_or_default()
    }
}

#[derive(Clone)]
pub enum MockResponse {
    Page { status: u16, body: String },
    Timeout,
}

/// Page fetcher serving canned responses; unknown URLs answer 404.
#[derive(Default)]
pub struct MockPageFetcher {
    responses: HashMap<String, MockResponse>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            MockResponse::Page {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), MockResponse::Timeout);
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, BriefError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(url) {
            Some(MockResponse::Page { status, body }) => Ok(FetchedPage {
                status: *status,
                body: body.clone(),
            }),
            Some(MockResponse::Timeout) => Err(BriefError::FetchError(
                "request timed out: operation timed out".to_string(),
            )),
            None => Ok(FetchedPage {
                status: 404,
                body: "<html><body><p>Not found</p></body></html>".to_string(),
            }),
        }
    }
}
