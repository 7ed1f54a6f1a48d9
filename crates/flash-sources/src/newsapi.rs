//! NewsAPI `/v2/everything` client with ordered API-key rotation.

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use flash_core::{
    domain_from_url, source_authority, source_reach, Channel, Mention, MonitorBrief,
};

use crate::error::SourceError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Client for the NewsAPI `everything` endpoint.
///
/// Holds the full ordered key list; [`NewsApiClient::fetch`] walks it until
/// a key answers, so a rate-limited or revoked key only costs one request.
pub struct NewsApiClient {
    client: reqwest::Client,
    keys: Vec<String>,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NewsApiClient {
    #[must_use]
    pub fn new(client: reqwest::Client, keys: Vec<String>) -> Self {
        Self::with_base_url(client, keys, DEFAULT_BASE_URL)
    }

    /// Custom base URL for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_url(client: reqwest::Client, keys: Vec<String>, base_url: &str) -> Self {
        Self {
            client,
            keys,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }

    #[must_use]
    pub fn retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetch articles for the brief's tracked brands within the strict
    /// `[now - lookback, now]` window.
    ///
    /// Keys are tried in order; a key failing with any status advances the
    /// rotation. Articles without a parseable timestamp, or published
    /// before the window opens, are dropped.
    ///
    /// # Errors
    ///
    /// Returns the last key's error when every key fails, or
    /// [`SourceError::Api`] when no keys are configured.
    pub async fn fetch(
        &self,
        brief: &MonitorBrief,
        now: DateTime<Utc>,
    ) -> Result<Vec<Mention>, SourceError> {
        if self.keys.is_empty() {
            return Err(SourceError::Api("no NewsAPI keys configured".to_string()));
        }

        let from_dt = now - chrono::Duration::hours(i64::from(brief.lookback_hours));
        let url = self.build_url(brief, from_dt, now);
        let tracked = brief.tracked_brands();

        let mut last_err = None;
        for key in &self.keys {
            let attempt = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                self.request_with_key(&url, key)
            })
            .await;
            match attempt {
                Ok(response) => {
                    return Ok(mentions_from_articles(response.articles, &tracked, from_dt));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "NewsAPI key failed, rotating to next key");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| SourceError::Api("NewsAPI rotation exhausted".to_string())))
    }

    fn build_url(&self, brief: &MonitorBrief, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        let query = brief
            .tracked_brands()
            .iter()
            .map(|b| format!("\"{b}\""))
            .collect::<Vec<_>>()
            .join(" OR ");
        let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        format!(
            "{}/v2/everything?q={}&from={}&to={}&language=en&pageSize=100&sortBy=publishedAt",
            self.base_url,
            encoded,
            from.to_rfc3339_opts(SecondsFormat::Secs, true),
            to.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    async fn request_with_key(
        &self,
        url: &str,
        key: &str,
    ) -> Result<EverythingResponse, SourceError> {
        let resp = self
            .client
            .get(url)
            .header("Authorization", key)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!("NewsAPI returned {status}")));
        }
        Ok(resp.json::<EverythingResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    source: Option<ArticleSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

fn mentions_from_articles(
    articles: Vec<Article>,
    tracked: &[String],
    from_dt: DateTime<Utc>,
) -> Vec<Mention> {
    articles
        .into_iter()
        .filter_map(|art| {
            let published_at = art
                .published_at
                .as_deref()
                .and_then(|p| DateTime::parse_from_rfc3339(p).ok())
                .map(|dt| dt.with_timezone(&Utc))?;
            if published_at < from_dt {
                return None;
            }

            let title = art.title.unwrap_or_default();
            let description = art.description.unwrap_or_default();
            let text = format!("{title} {description}").trim().to_string();
            if text.is_empty() {
                return None;
            }

            let link = art.url.unwrap_or_default();
            let source = if link.is_empty() {
                art.source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "newsapi".to_string())
                    .to_lowercase()
            } else {
                domain_from_url(&link)
            };

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
