//! Placeholder social mentions.
//!
//! The social platform APIs (FB / IG / Threads) are not wired up yet; each
//! platform contributes generated records so the engagement KPIs and the
//! dashboard stay populated. Replace per platform as real integrations land.

use chrono::{DateTime, Utc};
use rand::Rng;

use flash_core::{Channel, Mention, MonitorBrief};

pub(crate) const PLATFORMS: &[&str] = &["fb", "ig", "threads"];

/// Generate 5-15 placeholder mentions for one platform, spread across the
/// brief's lookback window with plausible engagement numbers.
pub(crate) fn placeholder_mentions(
    brief: &MonitorBrief,
    platform: &str,
    now: DateTime<Utc>,
) -> Vec<Mention> {
    let mut rng = rand::rng();
    let brands = brief.tracked_brands();
    let count = rng.random_range(5..=15);

    (0..count)
        .map(|_| {
            let brand = &brands[rng.random_range(0..brands.len())];
            let hours_ago = rng.random_range(1..=i64::from(brief.lookback_hours));
            Mention {
                text: format!("Placeholder mention of {brand} on {platform}."),
                source: format!("placeholder.{platform}.com"),
                channel: Channel::Social,
                published_at: now - chrono::Duration::hours(hours_ago),
                link: String::new(),
                mentioned_brands: vec![brand.clone()],
                authority: rng.random_range(1..=10),
                reach: rng.random_range(1_000..=100_000),
                likes: rng.random_range(10..=1_000),
                comments: rng.random_range(1..=100),
                sentiment: None,
            }
        })
        .collect()
}
