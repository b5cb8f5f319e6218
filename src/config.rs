use crate::types::{DigestError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Feed list and run settings, read from a JSON configuration file.
/// Unknown fields in the file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feeds: Vec<String>,
    pub settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Articles older than this many days are dropped. Must be positive.
    pub article_age_days: u32,
    /// Path of the persisted seen-article id list.
    pub seen_articles_file: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DigestError::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    let config: Config = serde_json::from_str(&raw).map_err(|e| {
        DigestError::Config(format!("Malformed config file {}: {}", path.display(), e))
    })?;

    validate(&config)?;
    debug!("Loaded {} feeds from {}", config.feeds.len(), path.display());
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.settings.article_age_days == 0 {
        return Err(DigestError::Config(
            "article_age_days must be positive".to_string(),
        ));
    }

    for feed in &config.feeds {
        let url = Url::parse(feed)
            .map_err(|e| DigestError::Config(format!("Invalid feed URL {}: {}", feed, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DigestError::Config(format!(
                "Feed URL must be http or https: {}",
                feed
            )));
        }
    }

    Ok(())
}
