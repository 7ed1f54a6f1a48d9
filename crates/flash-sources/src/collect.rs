//! Source orchestration: fetch from every source, dedup, cache.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;

use flash_core::{AppConfig, Mention, MonitorBrief};

use crate::aggregator;
use crate::cache::FetchCache;
use crate::feeds::FeedTable;
use crate::newsapi::NewsApiClient;
use crate::rss;
use crate::social;

/// Below this many API/RSS results the aggregator HTML fallback kicks in.
const AGGREGATOR_FALLBACK_MIN: usize = 5;

/// Collect mentions for a brief from every configured source.
///
/// Never fails: each source degrades independently (logged and skipped),
/// and the social placeholders always contribute. Results are served from
/// the TTL cache when a fresh entry exists.
pub async fn collect_mentions(config: &AppConfig, brief: &MonitorBrief) -> Vec<Mention> {
    let now = Utc::now();
    let cache = FetchCache::new(&config.cache_dir, config.cache_ttl_minutes);

    if let Some(hit) = cache.get(brief, now) {
        tracing::info!(brand = %brief.brand, count = hit.len(), "serving mentions from cache");
        return hit;
    }

    let client = http_client(config);
    let cutoff = now - chrono::Duration::hours(i64::from(brief.lookback_hours));
    let feed_table = FeedTable::load(config.feeds_path.as_deref());

    let news_fut = async {
        if config.newsapi_keys.is_empty() {
            tracing::debug!("NEWSAPI_KEYS not set, skipping NewsAPI");
            return Vec::new();
        }
        let api = NewsApiClient::new(client.clone(), config.newsapi_keys.clone())
            .retry_policy(config.http_max_retries, config.http_retry_backoff_ms);
        match api.fetch(brief, now).await {
            Ok(mentions) => {
                tracing::debug!(brand = %brief.brand, count = mentions.len(), "collected NewsAPI mentions");
                mentions
            }
            Err(e) => {
                tracing::warn!(brand = %brief.brand, source = "newsapi", error = %e, "NewsAPI fetch failed");
                Vec::new()
            }
        }
    };
    let rss_fut = rss::fetch_industry_feeds(&client, &feed_table, brief, cutoff);

    let (news, feeds) = tokio::join!(news_fut, rss_fut);
    let mut mentions = news;
    mentions.extend(feeds);

    if mentions.len() < AGGREGATOR_FALLBACK_MIN {
        match aggregator::fetch_aggregator(&client, aggregator::DEFAULT_BASE_URL, brief, now).await
        {
            Ok(scraped) => {
                tracing::debug!(brand = %brief.brand, count = scraped.len(), "collected aggregator mentions");
                mentions.extend(scraped);
            }
            Err(e) => {
                tracing::warn!(brand = %brief.brand, source = "aggregator", error = %e, "aggregator fetch failed");
            }
        }
    }

    for platform in social::PLATFORMS {
        mentions.extend(social::placeholder_mentions(brief, platform, now));
    }

    dedup_mentions(&mut mentions);
    cache.put(brief, &mentions, now);

    tracing::info!(brand = %brief.brand, count = mentions.len(), "mention collection complete");
    mentions
}

fn http_client(config: &AppConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(config.http_user_agent.clone())
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "HTTP client build failed, using defaults");
            reqwest::Client::new()
        })
}

/// Drop duplicates by (link, leading text) signature, keeping first seen.
pub(crate) fn dedup_mentions(mentions: &mut Vec<Mention>) {
    let mut seen = HashSet::new();
    mentions.retain(|m| {
        let head: String = m.text.chars().take(200).collect();
        seen.insert(format!("{}||{head}", m.link))
    });
}
