//! newsbrief - an RSS aggregator that attaches a short extractive summary to
//! every item.
//!
//! For each feed entry a summary is resolved through a fallback chain:
//! 1. Content embedded in the feed entry
//! 2. The entry description, markup removed
//! 3. The linked article page, fetched live and reduced to its paragraphs
//!
//! and finally a fixed placeholder when nothing usable is found.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution of the JSON API
//! - feed-rs for RSS/Atom/JSON Feed parsing
//! - scraper for HTML text extraction
//! - LexRank over stemmed, stop-word-filtered terms for summarization
//! - governor and Tokio semaphores for per-host politeness
//!
//! # Example
//!
//! ```no_run
//! use newsbrief::core::config::AppConfig;
//! use newsbrief::features::build_aggregator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     newsbrief::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let aggregator = build_aggregator(&config)?;
//!
//!     let page = aggregator.list_recent(1, config.per_page).await;
//!     for item in page.entries {
//!         println!("[{}] {}: {}", item.source_name, item.entry.title, item.summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod summarizer;
pub mod utils;

pub use errors::BriefError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output is filtered by `RUST_LOG` (default `info`). Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// newsbrief::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
