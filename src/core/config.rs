use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::core::models::FeedSource;
use crate::errors::BriefError;
use crate::summarizer::SummarizerConfig;

/// Desktop Chrome user-agent; some origins refuse requests from obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_PER_PAGE: usize = 10;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_POLITENESS_MS: u64 = 100;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_PER_HOST_CONCURRENCY: usize = 1;

/// Feeds used when `NEWSBRIEF_FEEDS` is not set.
pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new("Yahoo Finance", "https://finance.yahoo.com/news/rssindex"),
        FeedSource::new("Hacker News", "https://news.ycombinator.com/rss"),
        FeedSource::new(
            "Wall Street Journal",
            "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
        ),
        FeedSource::new(
            "CNBC",
            "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15839069",
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feeds: Vec<FeedSource>,
    pub per_page: usize,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub politeness_delay: Duration,
    pub max_concurrency: usize,
    pub per_host_concurrency: usize,
    pub language: String,
    pub sentence_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            per_page: DEFAULT_PER_PAGE,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            politeness_delay: Duration::from_millis(DEFAULT_POLITENESS_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            per_host_concurrency: DEFAULT_PER_HOST_CONCURRENCY,
            language: "english".to_string(),
            sentence_count: 3,
        }
    }
}

impl AppConfig {
    /// Build configuration from `NEWSBRIEF_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, BriefError> {
        let defaults = Self::default();

        let feeds = match env::var("NEWSBRIEF_FEEDS") {
            Ok(raw) if !raw.trim().is_empty() => parse_feeds(&raw)?,
            _ => defaults.feeds,
        };

        Ok(Self {
            feeds,
            per_page: positive_var("NEWSBRIEF_PER_PAGE", defaults.per_page)?,
            fetch_timeout: Duration::from_secs(positive_var(
                "NEWSBRIEF_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            user_agent: env::var("NEWSBRIEF_USER_AGENT").unwrap_or(defaults.user_agent),
            politeness_delay: Duration::from_millis(parse_var(
                "NEWSBRIEF_POLITENESS_MS",
                DEFAULT_POLITENESS_MS,
            )?),
            max_concurrency: positive_var("NEWSBRIEF_MAX_CONCURRENCY", defaults.max_concurrency)?,
            per_host_concurrency: positive_var(
                "NEWSBRIEF_PER_HOST_CONCURRENCY",
                defaults.per_host_concurrency,
            )?,
            language: env::var("NEWSBRIEF_LANGUAGE").unwrap_or(defaults.language),
            sentence_count: positive_var("NEWSBRIEF_SENTENCES", defaults.sentence_count)?,
        })
    }

    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            language: self.language.clone(),
            sentence_count: self.sentence_count,
            ..SummarizerConfig::default()
        }
    }
}

/// Parse `Name=URL` pairs separated by `;` or newlines.
///
/// Only the first `=` splits name from URL, so query strings survive.
pub fn parse_feeds(raw: &str) -> Result<Vec<FeedSource>, BriefError> {
    let mut feeds = Vec::new();

    for item in raw.split(['\n', ';']) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let Some((name, url)) = item.split_once('=') else {
            return Err(BriefError::ConfigError(format!(
                "NEWSBRIEF_FEEDS: expected Name=URL, got '{}'",
                item
            )));
        };

        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url::Url::parse(url).is_err() {
            return Err(BriefError::ConfigError(format!(
                "NEWSBRIEF_FEEDS: invalid feed '{}'",
                item
            )));
        }

        feeds.push(FeedSource::new(name, url));
    }

    if feeds.is_empty() {
        return Err(BriefError::ConfigError(
            "NEWSBRIEF_FEEDS: no feeds configured".to_string(),
        ));
    }

    Ok(feeds)
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, BriefError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BriefError::ConfigError(format!("{}: cannot parse '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

fn positive_var<T: FromStr + PartialOrd + Default>(name: &str, default: T) -> Result<T, BriefError> {
    let value = parse_var(name, default)?;
    if value <= T::default() {
        return Err(BriefError::ConfigError(format!("{}: must be positive", name)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_pairs_with_query_strings() {
        let feeds = parse_feeds(
            "HN=https://news.ycombinator.com/rss; CNBC=https://example.com/view.xml?partnerId=wrss01&id=1",
        )
        .unwrap();

        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0], FeedSource::new("HN", "https://news.ycombinator.com/rss"));
        assert_eq!(feeds[1].url, "https://example.com/view.xml?partnerId=wrss01&id=1");
    }

    #[test]
    fn rejects_malformed_feed_pairs() {
        assert!(parse_feeds("no separator here").is_err());
        assert!(parse_feeds("Name=not a url").is_err());
        assert!(parse_feeds(" ; \n ").is_err());
    }

    #[test]
    fn defaults_cover_four_feeds() {
        let config = AppConfig::default();
        assert_eq!(config.feeds.len(), 4);
        assert_eq!(config.per_page, 10);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.summarizer_config().sentence_count, 3);
    }
}
