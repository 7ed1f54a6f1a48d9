use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a mention was collected from.
///
/// Engagement KPIs only count `Social` mentions; news outlets carry
/// authority and reach instead of likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    News,
    Social,
}

/// Sentiment label assigned to a mention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
    Anger,
    Appreciation,
}

impl Sentiment {
    pub const ALL: [Sentiment; 6] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Mixed,
        Sentiment::Anger,
        Sentiment::Appreciation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Mixed => "mixed",
            Sentiment::Anger => "anger",
            Sentiment::Appreciation => "appreciation",
        }
    }

    /// Labels that count toward the Media Impact Score.
    #[must_use]
    pub fn is_favorable(self) -> bool {
        matches!(self, Sentiment::Positive | Sentiment::Appreciation)
    }

    /// Labels that count toward the negative-share alert threshold.
    #[must_use]
    pub fn is_unfavorable(self) -> bool {
        matches!(self, Sentiment::Negative | Sentiment::Anger)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "mixed" => Ok(Sentiment::Mixed),
            "anger" => Ok(Sentiment::Anger),
            "appreciation" => Ok(Sentiment::Appreciation),
            _ => Err(()),
        }
    }
}

/// A single collected brand mention.
///
/// Produced by the source fetchers, labelled by the classifier, and
/// consumed by the KPI aggregator and the report renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    /// Title plus snippet, whitespace-collapsed.
    pub text: String,
    /// Source domain (`nytimes.com`) or placeholder platform name.
    pub source: String,
    pub channel: Channel,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub link: String,
    /// Tracked brands whose names appear in `text`.
    #[serde(default)]
    pub mentioned_brands: Vec<String>,
    /// Outlet authority weight, 1-10.
    pub authority: u32,
    /// Estimated audience size for the outlet.
    pub reach: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl Mention {
    /// Brands from `candidates` whose names occur (case-insensitively) in `text`.
    #[must_use]
    pub fn brands_in_text(text: &str, candidates: &[String]) -> Vec<String> {
        let lower = text.to_lowercase();
        candidates
            .iter()
            .filter(|b| lower.contains(&b.to_lowercase()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_round_trips_through_str() {
        for s in Sentiment::ALL {
            assert_eq!(s.as_str().parse::<Sentiment>(), Ok(s));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("enthusiastic".parse::<Sentiment>().is_err());
    }

    #[test]
    fn favorable_and_unfavorable_partition() {
        assert!(Sentiment::Positive.is_favorable());
        assert!(Sentiment::Appreciation.is_favorable());
        assert!(Sentiment::Negative.is_unfavorable());
        assert!(Sentiment::Anger.is_unfavorable());
        assert!(!Sentiment::Neutral.is_favorable());
        assert!(!Sentiment::Neutral.is_unfavorable());
        assert!(!Sentiment::Mixed.is_favorable());
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Appreciation).expect("serialize");
        assert_eq!(json, "\"appreciation\"");
    }

    #[test]
    fn brands_in_text_matches_case_insensitively() {
        let candidates = vec!["BrandX".to_string(), "Rival".to_string()];
        let found = Mention::brands_in_text("brandx launches a new product", &candidates);
        assert_eq!(found, vec!["BrandX".to_string()]);
    }

    #[test]
    fn brands_in_text_empty_when_no_match() {
        let candidates = vec!["BrandX".to_string()];
        assert!(Mention::brands_in_text("unrelated headline", &candidates).is_empty());
    }
}
