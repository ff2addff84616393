//! Summary resolution for a single feed entry.
//!
//! Steps run in order and the first accepted summary wins:
//! embedded content, description, live fetch of the linked page. When every
//! step is skipped the placeholder is returned.

use std::sync::Arc;
use tracing::debug;

use crate::clients::PageFetcher;
use crate::core::models::{FeedEntry, PLACEHOLDER_SUMMARY, SummarySource};
use crate::summarizer::{Summarizer, word_count};
use crate::utils::html::{extract_article_text, strip_tags};
use crate::utils::links::is_fetchable;

/// Acceptance rules for one step of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPolicy {
    /// The step's input text must have at least this many words.
    pub min_words: usize,
    /// Reject a summary equal (ignoring case) to the entry title.
    pub reject_title_match: bool,
}

impl StepPolicy {
    pub const fn new(min_words: usize, reject_title_match: bool) -> Self {
        Self {
            min_words,
            reject_title_match,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicies {
    pub embedded: StepPolicy,
    pub description: StepPolicy,
    pub live_fetch: StepPolicy,
}

impl Default for ResolverPolicies {
    fn default() -> Self {
        Self {
            // Embedded content is trusted as-is; only the summarizer's own minimum applies.
            embedded: StepPolicy::new(0, false),
            description: StepPolicy::new(21, true),
            live_fetch: StepPolicy::new(0, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted(String),
    Skipped(String),
}

/// A resolved summary and the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub summary: String,
    pub source: SummarySource,
}

impl Resolution {
    pub fn placeholder() -> Self {
        Self {
            summary: PLACEHOLDER_SUMMARY.to_string(),
            source: SummarySource::Placeholder,
        }
    }
}

pub struct SummaryResolver {
    summarizer: Arc<Summarizer>,
    fetcher: Arc<dyn PageFetcher>,
    policies: ResolverPolicies,
}

impl SummaryResolver {
    pub fn new(summarizer: Arc<Summarizer>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            summarizer,
            fetcher,
            policies: ResolverPolicies::default(),
        }
    }

    #[must_use]
    pub fn with_policies(mut self, policies: ResolverPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Resolve the summary for `entry`. Never fails and never returns an
    /// empty summary.
    pub async fn resolve(&self, entry: &FeedEntry) -> Resolution {
        let outcome = self.from_embedded_content(entry);
        if let Some(resolution) = settle(entry, SummarySource::EmbeddedContent, outcome) {
            return resolution;
        }

        let outcome = self.from_description(entry);
        if let Some(resolution) = settle(entry, SummarySource::Description, outcome) {
            return resolution;
        }

        let outcome = self.from_live_fetch(entry).await;
        if let Some(resolution) = settle(entry, SummarySource::LiveFetch, outcome) {
            return resolution;
        }

        Resolution::placeholder()
    }

    /// Step 1: the first embedded content block that summarizes.
    pub fn from_embedded_content(&self, entry: &FeedEntry) -> StepOutcome {
        if entry.embedded_content.is_empty() {
            return StepOutcome::Skipped("no embedded content".to_string());
        }

        let policy = self.policies.embedded;
        let mut last_reason = String::from("embedded content is empty");

        for block in &entry.embedded_content {
            let text = strip_tags(block);
            if text.trim().is_empty() {
                continue;
            }

            match self.summarize_under(policy, &text, &entry.title) {
                StepOutcome::Accepted(summary) => return StepOutcome::Accepted(summary),
                StepOutcome::Skipped(reason) => last_reason = reason,
            }
        }

        StepOutcome::Skipped(last_reason)
    }

    /// Step 2: the entry description with markup removed.
    pub fn from_description(&self, entry: &FeedEntry) -> StepOutcome {
        let Some(description) = entry.description.as_deref() else {
            return StepOutcome::Skipped("no description".to_string());
        };

        let text = strip_tags(description);
        self.summarize_under(self.policies.description, &text, &entry.title)
    }

    /// Step 3: fetch the linked page and summarize its article text.
    pub async fn from_live_fetch(&self, entry: &FeedEntry) -> StepOutcome {
        if !is_fetchable(&entry.link) {
            return StepOutcome::Skipped(format!("link '{}' is not fetchable", entry.link));
        }

        let page = match self.fetcher.get(&entry.link).await {
            Ok(page) => page,
            Err(e) => return StepOutcome::Skipped(e.to_string()),
        };

        if !page.is_ok() {
            return StepOutcome::Skipped(format!("HTTP status {}", page.status));
        }

        let text = match extract_article_text(&page.body) {
            Ok(text) => text,
            Err(e) => return StepOutcome::Skipped(e.to_string()),
        };

        #[cfg(feature = "debug-logs")]
        debug!(link = %entry.link, chars = text.chars().count(), "Extracted article text");

        self.summarize_under(self.policies.live_fetch, &text, &entry.title)
    }

    fn summarize_under(&self, policy: StepPolicy, text: &str, title: &str) -> StepOutcome {
        let words = word_count(text);
        if words < policy.min_words {
            return StepOutcome::Skipped(format!(
                "{} words, step needs at least {}",
                words, policy.min_words
            ));
        }

        let summary = match self.summarizer.summarize(text) {
            Ok(summary) => summary,
            Err(e) => return StepOutcome::Skipped(e.to_string()),
        };

        if policy.reject_title_match && summary.to_lowercase() == title.to_lowercase() {
            return StepOutcome::Skipped("summary only repeats the title".to_string());
        }

        StepOutcome::Accepted(summary)
    }
}

fn settle(entry: &FeedEntry, source: SummarySource, outcome: StepOutcome) -> Option<Resolution> {
    match outcome {
        StepOutcome::Accepted(summary) => {
            #[cfg(feature = "debug-logs")]
            debug!(link = %entry.link, step = ?source, summary = %summary, "Summary accepted");
            Some(Resolution { summary, source })
        }
        StepOutcome::Skipped(reason) => {
            debug!(link = %entry.link, step = ?source, reason = %reason, "Step skipped");
            None
        }
    }
}
