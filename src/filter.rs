use crate::seen::SeenStore;
use crate::types::Article;
use chrono::{DateTime, Duration, Utc};

/// Retains articles published within the age window and not yet delivered.
/// Output order follows input order; presentation sorting happens in the
/// formatter.
pub fn select(
    articles: Vec<Article>,
    seen: &SeenStore,
    now: DateTime<Utc>,
    age_days: u32,
) -> Vec<Article> {
    let cutoff = now - Duration::days(i64::from(age_days));

    articles
        .into_iter()
        .filter(|article| article.published >= cutoff && !seen.contains(&article.id))
        .collect()
}
