pub mod collect;
pub mod resolve;

use std::sync::Arc;

use crate::clients::{HttpFeedFetcher, HttpPageFetcher, RateLimitedPageFetcher};
use crate::core::config::AppConfig;
use crate::errors::BriefError;
use crate::summarizer::Summarizer;

pub use collect::{Aggregator, AggregatorOptions};
pub use resolve::{Resolution, ResolverPolicies, StepOutcome, StepPolicy, SummaryResolver};

/// Wire the HTTP clients, summarizer and resolver described by `config`.
pub fn build_aggregator(config: &AppConfig) -> Result<Aggregator, BriefError> {
    let summarizer = Arc::new(Summarizer::new(&config.summarizer_config())?);

    let pages = RateLimitedPageFetcher::new(
        HttpPageFetcher::from_config(config)?,
        config.politeness_delay,
        config.per_host_concurrency,
    );
    let resolver = SummaryResolver::new(summarizer, Arc::new(pages));

    Ok(Aggregator::new(
        config.feeds.clone(),
        Arc::new(HttpFeedFetcher::from_config(config)?),
        Arc::new(resolver),
        AggregatorOptions::from(config),
    ))
}
