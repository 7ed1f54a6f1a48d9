//! Industry RSS/Atom feed collector.

use chrono::{DateTime, Utc};
use feed_rs::model::Feed;

use flash_core::{
    domain_from_url, source_authority, source_reach, Channel, Mention, MonitorBrief,
};

use crate::error::SourceError;
use crate::feeds::FeedTable;

/// Fetch every feed configured for the brief's industry and keep entries
/// newer than `cutoff`. Feeds are polled concurrently; a feed that fails to
/// fetch or parse is logged and skipped.
pub(crate) async fn fetch_industry_feeds(
    client: &reqwest::Client,
    table: &FeedTable,
    brief: &MonitorBrief,
    cutoff: DateTime<Utc>,
) -> Vec<Mention> {
    let tracked = brief.tracked_brands();
    let tracked = tracked.as_slice();
    let urls = table.feeds_for(brief.industry.as_deref());

    let fetches = urls.iter().map(|url| async move {
        match fetch_feed(client, url).await {
            Ok(feed) => {
                let mentions = mentions_from_feed(&feed, url, tracked, cutoff);
                tracing::debug!(feed = %url, count = mentions.len(), "collected RSS entries");
                mentions
            }
            Err(e) => {
                tracing::warn!(feed = %url, error = %e, "RSS feed fetch failed");
                Vec::new()
            }
        }
    });

    futures::future::join_all(fetches)
        .await
        .into_iter()
        .flatten()
        .collect()
}

async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Feed, SourceError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(feed_rs::parser::parse(bytes.as_ref())?)
}

/// Turn feed entries into mentions. Entries without a timestamp, or older
/// than `cutoff`, are dropped; summaries have their HTML stripped.
pub(crate) fn mentions_from_feed(
    feed: &Feed,
    feed_url: &str,
    tracked: &[String],
    cutoff: DateTime<Utc>,
) -> Vec<Mention> {
    feed.entries
        .iter()
        .filter_map(|entry| {
            let published_at = entry.published.or(entry.updated)?;
            if published_at < cutoff {
                return None;
            }

            let title = entry
                .title
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default();
            let summary = entry
                .summary
                .as_ref()
                .map(|s| strip_html(&s.content))
                .unwrap_or_default();
            let text = format!("{title} {summary}").trim().to_string();
            if text.is_empty() {
                return None;
            }

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let source = domain_from_url(if link.is_empty() { feed_url } else { &link });

            Some(Mention {
                mentioned_brands: Mention::brands_in_text(&text, tracked),
                authority: source_authority(&source),
                reach: source_reach(&source),
                text,
                channel: Channel::News,
                published_at,
                link,
                source,
                likes: 0,
                comments: 0,
                sentiment: None,
            })
        })
        .collect()
}

/// Strip HTML tags from a string, returning plain text.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.trim().to_string()
}
