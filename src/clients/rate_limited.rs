//! Per-host politeness for page fetches.
//!
//! Wraps any [`PageFetcher`] with a `governor` limiter keyed by host and a
//! semaphore per host bounding in-flight requests.

use async_trait::async_trait;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use super::{FetchedPage, PageFetcher};
use crate::errors::BriefError;
use crate::utils::links::host_of;

pub struct RateLimitedPageFetcher<P: PageFetcher> {
    inner: P,
    /// `None` when the politeness delay is zero.
    limiter: Option<DefaultKeyedRateLimiter<String>>,
    per_host_concurrency: usize,
    host_slots: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl<P: PageFetcher> RateLimitedPageFetcher<P> {
    /// Space requests to one host by `delay` and allow at most
    /// `per_host_concurrency` of them in flight at once.
    pub fn new(inner: P, delay: Duration, per_host_concurrency: usize) -> Self {
        Self {
            inner,
            limiter: Quota::with_period(delay).map(RateLimiter::keyed),
            per_host_concurrency: per_host_concurrency.max(1),
            host_slots: Mutex::new(HashMap::new()),
        }
    }

    fn slots_for(&self, host: &str) -> Arc<Semaphore> {
        let mut slots = self
            .host_slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slots
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host_concurrency)))
            .clone()
    }
}

#[async_trait]
impl<P: PageFetcher> PageFetcher for RateLimitedPageFetcher<P> {
    async fn get(&self, url: &str) -> Result<FetchedPage, BriefError> {
        let Some(host) = host_of(url) else {
            return self.inner.get(url).await;
        };

        let _permit = self
            .slots_for(&host)
            .acquire_owned()
            .await
            .map_err(|e| BriefError::FetchError(format!("host slot closed: {}", e)))?;

        if let Some(limiter) = &self.limiter {
            limiter.until_key_ready(&host).await;
        }

        self.inner.get(url).await
    }
}
