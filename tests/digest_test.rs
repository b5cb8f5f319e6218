use chrono::{DateTime, TimeZone, Utc};
use rss_digest::digest::render;
use rss_digest::Article;

fn article(id: &str, source: &str, feed_title: &str, published: DateTime<Utc>) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Title of {}", id),
        link: format!("https://news.example/{}", id),
        published,
        source: source.to_string(),
        feed_title: feed_title.to_string(),
        summary: None,
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn render_is_deterministic() {
    let now = fixed_now();
    let articles = vec![
        article("a", "https://one.example/feed", "One", now),
        article("b", "https://two.example/feed", "Two", now),
    ];
    let failed = vec!["https://broken.example/feed".to_string()];

    let first = render(&articles, &failed, 7, now);
    let second = render(&articles, &failed, 7, now);
    assert_eq!(first, second);
}

#[test]
fn groups_by_source_in_first_encounter_order() {
    let now = fixed_now();
    let articles = vec![
        article("a1", "https://one.example/feed", "Feed One", now),
        article("b1", "https://two.example/feed", "Feed Two", now),
        article("a2", "https://one.example/feed", "Feed One", now),
    ];

    let html = render(&articles, &[], 7, now);

    let one = html.find("<h2>Feed One (2 articles)</h2>").unwrap();
    let two = html.find("<h2>Feed Two (1 articles)</h2>").unwrap();
    assert!(one < two, "sections follow first-encounter order of the input");
}

#[test]
fn sorts_newest_first_within_group_and_breaks_ties_by_id() {
    let now = fixed_now();
    let source = "https://one.example/feed";
    let older = now - chrono::Duration::days(2);
    let articles = vec![
        article("old", source, "Feed One", older),
        article("tie-b", source, "Feed One", now),
        article("tie-a", source, "Feed One", now),
    ];

    let html = render(&articles, &[], 7, now);

    let pos_a = html.find("Title of tie-a").unwrap();
    let pos_b = html.find("Title of tie-b").unwrap();
    let pos_old = html.find("Title of old").unwrap();
    assert!(pos_a < pos_b, "equal timestamps fall back to id order");
    assert!(pos_b < pos_old, "newest articles come first");
}

#[test]
fn empty_input_produces_no_new_articles_document() {
    let html = render(&[], &[], 3, fixed_now());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    assert!(html.contains("No new articles found from the last 3 days."));
}

#[test]
fn summary_line_counts_articles_and_sources() {
    let now = fixed_now();
    let articles = vec![
        article("a1", "https://one.example/feed", "One", now),
        article("a2", "https://one.example/feed", "One", now),
        article("b1", "https://two.example/feed", "Two", now),
    ];

    let html = render(&articles, &[], 7, now);
    assert!(html.contains(
        "<strong>3</strong> new articles from <strong>2</strong> sources in the last 7 days."
    ));
}

#[test]
fn escapes_feed_controlled_text() {
    let now = fixed_now();
    let mut evil = article("x", "https://one.example/feed", "One", now);
    evil.title = "<script>alert(1)</script> & friends".to_string();

    let html = render(&[evil], &[], 7, now);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn lists_failed_feeds() {
    let failed = vec![
        "https://broken.example/feed".to_string(),
        "https://down.example/rss".to_string(),
    ];

    let html = render(&[], &failed, 7, fixed_now());
    assert!(html.contains("Failed to Fetch (2 feeds)"));
    assert!(html.contains("https://broken.example/feed"));
    assert!(html.contains("https://down.example/rss"));
}

#[test]
fn header_carries_generation_date() {
    let html = render(&[], &[], 7, fixed_now());
    assert!(html.contains("<h1>RSS Digest - Sunday, June 01, 2025</h1>"));
}
