//! Mention collection for Flash Narrative.
//!
//! Gathers brand mentions from NewsAPI (primary, with key rotation),
//! industry RSS feeds, and a scraped news-aggregator fallback, and fills the
//! social channels with placeholder records while those APIs remain
//! unavailable. Results are deduplicated and cached on disk for a short TTL.
//!
//! Individual source failures are logged and skipped; [`collect_mentions`]
//! always returns whatever could be gathered.

mod aggregator;
mod cache;
mod collect;
mod error;
mod feeds;
mod newsapi;
mod retry;
mod rss;
mod social;

pub use cache::FetchCache;
pub use collect::collect_mentions;
pub use error::SourceError;
pub use feeds::FeedTable;
pub use newsapi::NewsApiClient;
