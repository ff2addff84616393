mod common;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use common::{MockPageFetcher, StaticFeedFetcher, article_text, entry, resolver};
use newsbrief::core::models::{FeedEntry, FeedSource, PLACEHOLDER_SUMMARY, SummarySource};
use newsbrief::features::{Aggregator, AggregatorOptions};

const MARKETS: &str = "https://markets.example.com/rss";
const TECH: &str = "https://tech.example.com/rss";

fn dated(title: &str, link: &str, hours: i64) -> FeedEntry {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    FeedEntry {
        published_at: Some(base + ChronoDuration::hours(hours)),
        ..entry(title, link)
    }
}

fn aggregator(feeds: StaticFeedFetcher, pages: Arc<MockPageFetcher>) -> Aggregator {
    Aggregator::new(
        vec![
            FeedSource::new("Markets", MARKETS),
            FeedSource::new("Tech", TECH),
        ],
        Arc::new(feeds),
        Arc::new(resolver(pages)),
        AggregatorOptions { max_concurrency: 4 },
    )
}

/// 23 entries split across two feeds, hour offsets interleaved.
fn twenty_three_entries() -> StaticFeedFetcher {
    let markets = (0..12)
        .map(|i| dated(&format!("markets {i}"), &format!("https://markets.example.com/{i}"), i * 2))
        .collect();
    let tech = (0..11)
        .map(|i| dated(&format!("tech {i}"), &format!("https://tech.example.com/{i}"), i * 2 + 1))
        .collect();
    StaticFeedFetcher::new()
        .with_feed(MARKETS, markets)
        .with_feed(TECH, tech)
}

#[tokio::test]
async fn test_pagination_over_twenty_three_entries() {
    let agg = aggregator(twenty_three_entries(), Arc::new(MockPageFetcher::new()));

    let first = agg.list_recent(1, 10).await;
    assert_eq!(first.entries.len(), 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_entries, 23);
    assert_eq!(first.entries[0].entry.title, "markets 11");
    assert_eq!(first.entries[1].entry.title, "tech 10");

    let second = agg.list_recent(2, 10).await;
    assert_eq!(second.entries.len(), 10);

    let third = agg.list_recent(3, 10).await;
    assert_eq!(third.entries.len(), 3);
    assert_eq!(third.page, 3);
    assert_eq!(third.entries[2].entry.title, "markets 0");

    assert!(agg.list_recent(4, 10).await.entries.is_empty());
}

#[tokio::test]
async fn test_recent_is_newest_first_with_undated_last() {
    let feeds = StaticFeedFetcher::new()
        .with_feed(
            MARKETS,
            vec![
                entry("undated", "https://markets.example.com/u"),
                dated("old", "https://markets.example.com/o", 1),
            ],
        )
        .with_feed(TECH, vec![dated("new", "https://tech.example.com/n", 5)]);
    let agg = aggregator(feeds, Arc::new(MockPageFetcher::new()));

    let page = agg.list_recent(1, 10).await;
    let titles: Vec<_> = page.entries.iter().map(|r| r.entry.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "old", "undated"]);
    assert_eq!(page.entries[0].source_name, "Tech");
}

#[tokio::test]
async fn test_collect_keeps_feed_order_under_concurrency() {
    let feeds = StaticFeedFetcher::new()
        .with_feed(
            MARKETS,
            vec![
                entry("slow", "https://markets.example.com/slow"),
                entry("fast", "https://markets.example.com/fast"),
            ],
        )
        .with_feed(TECH, vec![entry("tech", "https://tech.example.com/t")]);
    let pages = MockPageFetcher::new()
        .with_delay("https://markets.example.com/slow", Duration::from_millis(80))
        .with_page("https://tech.example.com/t", 200, &common::article_page());
    let agg = aggregator(feeds, Arc::new(pages));

    let collected = agg.collect().await;

    let titles: Vec<_> = collected.iter().map(|r| r.entry.title.as_str()).collect();
    assert_eq!(titles, vec!["slow", "fast", "tech"]);
    assert_eq!(collected[0].summary, PLACEHOLDER_SUMMARY);
    assert_eq!(collected[2].summary_source, SummarySource::LiveFetch);
}

#[tokio::test]
async fn test_each_entry_is_resolved_once() {
    let pages = Arc::new(MockPageFetcher::new());
    let agg = aggregator(twenty_three_entries(), pages.clone());

    let collected = agg.collect().await;
    assert_eq!(collected.len(), 23);

    let mut requested = pages.requested();
    requested.sort();
    requested.dedup();
    assert_eq!(requested.len(), 23);
    assert_eq!(pages.requested().len(), 23);
}

#[tokio::test]
async fn test_search_matches_titles_case_insensitively() {
    let mut with_body = entry("FED minutes released", "https://tech.example.com/minutes");
    with_body.embedded_content = vec![article_text()];

    let feeds = StaticFeedFetcher::new()
        .with_feed(
            MARKETS,
            vec![
                entry("Fed holds rates", "https://markets.example.com/fed"),
                entry("Oil prices climb", "https://markets.example.com/oil"),
            ],
        )
        .with_feed(TECH, vec![with_body]);
    let pages = Arc::new(MockPageFetcher::new());
    let agg = aggregator(feeds, pages.clone());

    let found = agg.search("fed").await;

    let titles: Vec<_> = found.iter().map(|r| r.entry.title.as_str()).collect();
    assert_eq!(titles, vec!["Fed holds rates", "FED minutes released"]);
    assert_eq!(found[1].summary_source, SummarySource::EmbeddedContent);
    assert!(!pages.requested().contains(&"https://markets.example.com/oil".to_string()));

    assert!(agg.search("bitcoin").await.is_empty());
}

#[tokio::test]
async fn test_failing_feed_contributes_nothing() {
    let feeds = StaticFeedFetcher::new().with_feed(MARKETS, vec![entry("only", "")]);
    let agg = aggregator(feeds, Arc::new(MockPageFetcher::new()));

    let collected = agg.collect().await;
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].source_name, "Markets");
}
