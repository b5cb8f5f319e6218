use crate::types::Article;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
    body {
        background-color: #f4f4f4;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        line-height: 1.6;
        color: #333;
        margin: 0;
        padding: 20px;
    }
    .container {
        max-width: 800px;
        margin: 0 auto;
        padding: 30px;
        border-radius: 12px;
        background-color: #ffffff;
        box-shadow: 0 4px 12px rgba(0,0,0,0.08);
    }
    h1 {
        color: #1a1a1a;
        font-size: 26px;
        border-bottom: 2px solid #eee;
        padding-bottom: 10px;
        margin-top: 0;
    }
    h2 {
        color: #333;
        font-size: 20px;
        border-bottom: 1px solid #f0f0f0;
        padding-bottom: 8px;
        margin-top: 35px;
    }
    ul {
        list-style-type: none;
        padding-left: 0;
    }
    li {
        margin-bottom: 12px;
        padding: 10px 15px;
        border-left: 3px solid #007BFF;
        background-color: #f8f9fa;
        border-radius: 4px;
    }
    .article-date {
        font-weight: 600;
        color: #555;
        margin-right: 8px;
        font-size: 0.9em;
    }
    a {
        color: #0056b3;
        text-decoration: none;
        font-weight: 500;
    }
    a:hover {
        text-decoration: underline;
    }
    .failed-feeds {
        margin-top: 40px;
        padding: 15px;
        background-color: #fbeaea;
        border: 1px solid #f5c6cb;
        border-radius: 8px;
    }
    .failed-feeds h3 {
        margin-top: 0;
        color: #721c24;
    }
    .summary {
        background-color: #e7f3ff;
        padding: 15px;
        border-radius: 8px;
        margin-bottom: 20px;
    }
"#;

/// Renders the digest document. Same inputs produce a byte-identical string.
///
/// Articles are grouped by source feed in first-encounter order of the input,
/// and within each group sorted newest first, ties broken by identifier. An
/// empty article list still yields a complete document with a "no new
/// articles" notice.
pub fn render(
    articles: &[Article],
    failed_feeds: &[String],
    age_days: u32,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str(&format!(
        "<h1>RSS Digest - {}</h1>",
        generated_at.format("%A, %B %d, %Y")
    ));

    let groups = group_by_source(articles);
    if groups.is_empty() {
        html.push_str(&format!(
            "<div class=\"summary\"><p>No new articles found from the last {} days.</p></div>",
            age_days
        ));
    } else {
        html.push_str(&format!(
            "<div class=\"summary\"><p><strong>{}</strong> new articles from <strong>{}</strong> sources in the last {} days.</p></div>",
            articles.len(),
            groups.len(),
            age_days
        ));

        for group in &groups {
            html.push_str(&format!(
                "<h2>{} ({} articles)</h2><ul>",
                encode_text(group.title),
                group.articles.len()
            ));
            for article in &group.articles {
                html.push_str(&format!(
                    "<li><span class=\"article-date\">{}</span><a href=\"{}\" target=\"_blank\">{}</a></li>",
                    article.published.format("%b %d"),
                    encode_double_quoted_attribute(&article.link),
                    encode_text(&article.title)
                ));
            }
            html.push_str("</ul>");
        }
    }

    if !failed_feeds.is_empty() {
        html.push_str("<div class=\"failed-feeds\">");
        html.push_str(&format!(
            "<h3>Failed to Fetch ({} feeds)</h3>",
            failed_feeds.len()
        ));
        html.push_str("<p>The following feeds could not be processed:</p><ul>");
        for url in failed_feeds {
            html.push_str(&format!("<li>{}</li>", encode_text(url)));
        }
        html.push_str("</ul></div>");
    }

    html.push_str("\n</div>\n</body>\n</html>\n");
    html
}

struct SourceGroup<'a> {
    title: &'a str,
    articles: Vec<&'a Article>,
}

fn group_by_source(articles: &[Article]) -> Vec<SourceGroup<'_>> {
    let mut groups: Vec<(&str, SourceGroup<'_>)> = Vec::new();

    for article in articles {
        match groups
            .iter()
            .position(|(source, _)| *source == article.source.as_str())
        {
            Some(i) => groups[i].1.articles.push(article),
            None => groups.push((
                article.source.as_str(),
                SourceGroup {
                    title: article.feed_title.as_str(),
                    articles: vec![article],
                },
            )),
        }
    }

    for (_, group) in &mut groups {
        group
            .articles
            .sort_by(|a, b| b.published.cmp(&a.published).then_with(|| a.id.cmp(&b.id)));
    }

    groups.into_iter().map(|(_, group)| group).collect()
}
