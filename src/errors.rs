use thiserror::Error;

#[derive(Debug, Error)]
pub enum BriefError {
    #[error("Failed to extract article text: {0}")]
    ExtractionError(String),

    #[error("Failed to summarize text: {0}")]
    SummarizationError(String),

    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    #[error("Failed to read feed: {0}")]
    FeedError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for BriefError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            BriefError::FetchError(format!("request timed out: {}", error))
        } else {
            BriefError::FetchError(error.to_string())
        }
    }
}

impl From<feed_rs::parser::ParseFeedError> for BriefError {
    fn from(error: feed_rs::parser::ParseFeedError) -> Self {
        BriefError::FeedError(error.to_string())
    }
}
