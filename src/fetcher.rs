use crate::types::{Article, DigestError, Result};
use chrono::{DateTime, Utc};
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "rss-digest/1.0".to_string(),
            timeout_seconds: 20,
        }
    }
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Retrieves and parses one feed, normalizing every entry into an
    /// [`Article`]. Any network, HTTP, or parse failure is reported as a
    /// fetch error scoped to this source; a failed source yields no articles.
    pub async fn fetch(&self, url: &str) -> Result<Vec<Article>> {
        debug!("Fetching feed: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let content = response.text().await.map_err(|e| fetch_error(url, &e))?;

        let feed = parser::parse(content.as_bytes()).map_err(|e| DigestError::Fetch {
            url: url.to_string(),
            reason: format!("Failed to parse feed: {}", e),
        })?;

        let fetched_at = Utc::now();
        let feed_title = feed
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled Feed".to_string());

        let mut articles = Vec::new();
        for entry in feed.entries {
            match normalize_entry(entry, url, &feed_title, fetched_at) {
                Some(article) => articles.push(article),
                None => debug!("Skipping entry without link in {}", url),
            }
        }

        info!("Fetched {} articles from {}", articles.len(), url);
        Ok(articles)
    }
}

fn fetch_error(url: &str, e: &reqwest::Error) -> DigestError {
    DigestError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

/// Maps one feed entry to an [`Article`]. Entries without a link are
/// rejected here rather than propagated downstream; a missing published date
/// falls back to the update date, then to the fetch time.
fn normalize_entry(
    entry: feed_rs::model::Entry,
    source: &str,
    feed_title: &str,
    fetched_at: DateTime<Utc>,
) -> Option<Article> {
    let link = entry.links.first()?.href.clone();

    let id = if entry.id.is_empty() {
        link.clone()
    } else {
        entry.id.clone()
    };

    let title = entry
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled".to_string());

    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(fetched_at);

    let summary = entry.summary.map(|s| s.content);

    Some(Article {
        id,
        title,
        link,
        published,
        source: source.to_string(),
        feed_title: feed_title.to_string(),
        summary,
    })
}
