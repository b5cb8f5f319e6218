use crate::config::Config;
use crate::digest;
use crate::fetcher::Fetcher;
use crate::filter;
use crate::mailer::Deliver;
use crate::seen::SeenStore;
use crate::types::{Article, Result, RunSummary};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Sequences one end-to-end run: fetch every feed, filter, render, deliver,
/// then persist the seen set.
pub struct DigestRunner<'a> {
    config: Config,
    fetcher: Fetcher,
    mailer: &'a dyn Deliver,
}

impl<'a> DigestRunner<'a> {
    pub fn new(config: Config, fetcher: Fetcher, mailer: &'a dyn Deliver) -> Self {
        Self {
            config,
            fetcher,
            mailer,
        }
    }

    /// Individual fetch failures are logged and counted but never abort the
    /// run; a mail failure does, and leaves the seen file untouched so the
    /// next run retries the same articles.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut seen = SeenStore::load(&self.config.settings.seen_articles_file);

        info!(
            "Starting digest run: {} feeds, {} previously seen articles",
            self.config.feeds.len(),
            seen.len()
        );

        let mut fetched: Vec<Article> = Vec::new();
        for url in &self.config.feeds {
            summary.feeds_attempted += 1;
            match self.fetcher.fetch(url).await {
                Ok(articles) => fetched.extend(articles),
                Err(e) => {
                    error!("Skipping feed {}: {}", url, e);
                    summary.feeds_failed += 1;
                    summary.failed_feeds.push(url.clone());
                }
            }
        }
        summary.articles_fetched = fetched.len();

        let selected = filter::select(
            fetched,
            &seen,
            now,
            self.config.settings.article_age_days,
        );
        summary.articles_selected = selected.len();
        info!(
            "Selected {} of {} fetched articles",
            summary.articles_selected, summary.articles_fetched
        );

        let html = digest::render(
            &selected,
            &summary.failed_feeds,
            self.config.settings.article_age_days,
            now,
        );
        let subject = format!("RSS Digest - {}", now.format("%A, %B %d, %Y"));

        self.mailer.deliver(&subject, &html)?;
        summary.delivered = true;

        // Only articles that actually went out are recorded as seen.
        for article in &selected {
            seen.record(article.id.clone());
        }
        seen.save()?;

        Ok(summary)
    }
}
