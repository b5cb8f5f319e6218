use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized feed entry. Built once by the fetcher, read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier: the feed-provided entry id, or the link when the
    /// feed supplies none.
    pub id: String,
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
    /// URL of the feed this article came from.
    pub source: String,
    /// Title of the feed this article came from.
    pub feed_title: String,
    pub summary: Option<String>,
}

/// Counters for a single end-to-end run, used for logging and exit status.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub feeds_attempted: usize,
    pub feeds_failed: usize,
    pub failed_feeds: Vec<String>,
    pub articles_fetched: usize,
    pub articles_selected: usize,
    pub delivered: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
