use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{FetchedPage, PageFetcher};
use crate::core::config::AppConfig;
use crate::errors::BriefError;

/// `reqwest` page fetcher with a fixed timeout and user-agent.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
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
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, BriefError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            debug!(url = %url, status, "Skipping body of non-200 page");
            return Ok(FetchedPage {
                status,
                body: String::new(),
            });
        }

        let body = response.text().await?;

        debug!(url = %url, status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage { status, body })
    }
}
