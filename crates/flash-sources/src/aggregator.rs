//! News-aggregator HTML fallback.
//!
//! Used when the API-backed sources come back thin. The result page markup
//! is not a contract, so extraction is heuristic: every anchor with an
//! absolute URL and a headline-sized text is a candidate, and only
//! candidates naming a tracked brand are kept. Timestamps are best-effort
//! "now"; the page does not expose machine-readable dates.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

use flash_core::{
    domain_from_url, source_authority, source_reach, Channel, Mention, MonitorBrief,
};

use crate::error::SourceError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://www.google.com";

/// Minimum anchor text length to count as a headline rather than chrome.
const MIN_HEADLINE_LEN: usize = 30;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]+href="(?:/url\?q=)?(https?://[^"&]+)[^"]*"[^>]*>(.*?)</a>"#)
        .expect("hard-coded regex compiles")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("hard-coded regex compiles"));

pub(crate) async fn fetch_aggregator(
    client: &reqwest::Client,
    base_url: &str,
    brief: &MonitorBrief,
    now: DateTime<Utc>,
) -> Result<Vec<Mention>, SourceError> {
    let query = brief.tracked_brands().join(" OR ");
    let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
    let url = format!(
        "{}/search?q={}&tbm=nws&hl=en",
        base_url.trim_end_matches('/'),
        encoded
    );

    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let tracked = brief.tracked_brands();
    Ok(mentions_from_html(&html, &tracked, now))
}

pub(crate) fn mentions_from_html(
    html: &str,
    tracked: &[String],
    now: DateTime<Utc>,
) -> Vec<Mention> {
    extract_headlines(html)
        .into_iter()
        .filter_map(|(link, title)| {
            let mentioned_brands = Mention::brands_in_text(&title, tracked);
            if mentioned_brands.is_empty() {
                return None;
            }
            let source = domain_from_url(&link);
            Some(Mention {
                authority: source_authority(&source),
                reach: source_reach(&source),
                text: title,
                channel: Channel::News,
                published_at: now,
                link,
                mentioned_brands,
                source,
                likes: 0,
                comments: 0,
                sentiment: None,
            })
        })
        .collect()
}

/// Extract `(link, headline)` pairs from a result page.
fn extract_headlines(html: &str) -> Vec<(String, String)> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|cap| {
            let link = cap.get(1)?.as_str().to_string();
            let inner = cap.get(2)?.as_str();
            let title = collapse_ws(&TAG_RE.replace_all(inner, " "));
            if title.len() < MIN_HEADLINE_LEN {
                return None;
            }
            Some((link, title))
        })
        .collect()
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
<html><body>
<div class="result">
  <a href="https://www.example.com/brandx-earnings?src=agg">
    <h3>BrandX posts record quarterly earnings on beverage demand</h3>
  </a>
</div>
<div class="result">
  <a href="https://other.example.org/markets">
    <h3>Broad market indexes drift lower in quiet trading day</h3>
  </a>
</div>
<a href="https://www.example.com/nav">Home</a>
</body></html>"#;

    #[test]
    fn extracts_headline_anchors_and_skips_chrome() {
        let headlines = extract_headlines(SAMPLE_HTML);
        assert_eq!(headlines.len(), 2, "nav links are too short to count");
        assert!(headlines[0].1.starts_with("BrandX posts record"));
    }

    #[test]
    fn keeps_only_tracked_brand_headlines() {
        let tracked = vec!["BrandX".to_string()];
        let mentions = mentions_from_html(SAMPLE_HTML, &tracked, Utc::now());
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].source, "example.com");
        assert_eq!(mentions[0].mentioned_brands, vec!["BrandX".to_string()]);
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(extract_headlines("<html></html>").is_empty());
    }
}
