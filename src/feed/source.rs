use std::fmt;

use async_trait::async_trait;

use super::types::{FeedPage, FeedQuery};

/// Errors that can occur while fetching the feed.
#[derive(Debug)]
pub enum SourceError {
    /// Source misconfigured (bad URL, missing path). Not retryable.
    Config(String),
    /// Reading a local feed file failed.
    Io(std::io::Error),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service returned an error response.
    Api { status: u16, message: String },
    /// The feed could not be decoded.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Io(e) => write!(f, "feed I/O error: {e}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Somewhere prompts come from. Ordering and filtering are the source's job.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetch the page of prompts matching `query`.
    async fn fetch(&self, query: &FeedQuery) -> Result<FeedPage, SourceError>;
}
