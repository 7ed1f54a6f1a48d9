//! The KPI rollup: one pass over the window-filtered mention list.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flash_core::{Channel, Mention, MonitorBrief, Sentiment};

/// Share-of-voice row: one tracked or discovered brand and its percentage
/// of all brand occurrences in the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SovEntry {
    pub brand: String,
    pub share_pct: f64,
}

/// The PR KPI bundle for one monitoring window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiReport {
    pub total_mentions: usize,
    /// Percentage share per sentiment label. Unlabelled mentions count as
    /// neutral.
    pub sentiment_ratio: BTreeMap<Sentiment, f64>,
    /// Brief brand first, then discovered brands in sorted order.
    pub sov: Vec<SovEntry>,
    /// Media Impact Score: summed authority of favorably-labelled mentions.
    pub mis: u64,
    /// Message Penetration Index: percent of mentions carrying campaign
    /// phrasing.
    pub mpi: f64,
    /// Mean likes+comments over social-channel mentions.
    pub engagement_rate: f64,
    /// Summed estimated audience over all mentions in the window.
    pub reach: u64,
}

impl KpiReport {
    fn zero() -> Self {
        Self {
            total_mentions: 0,
            sentiment_ratio: BTreeMap::new(),
            sov: Vec::new(),
            mis: 0,
            mpi: 0.0,
            engagement_rate: 0.0,
            reach: 0,
        }
    }

    /// Combined negative + anger percentage, the alerting input.
    #[must_use]
    pub fn negative_share(&self) -> f64 {
        Sentiment::ALL
            .iter()
            .filter(|s| s.is_unfavorable())
            .filter_map(|s| self.sentiment_ratio.get(s))
            .sum()
    }
}

/// Compute all KPIs over the mentions inside the brief's lookback window.
#[must_use]
pub fn compute_kpis(mentions: &[Mention], brief: &MonitorBrief, now: DateTime<Utc>) -> KpiReport {
    let cutoff = now - chrono::Duration::hours(i64::from(brief.lookback_hours));
    let kept: Vec<&Mention> = mentions
        .iter()
        .filter(|m| m.published_at >= cutoff)
        .collect();

    let total = kept.len();
    if total == 0 {
        return KpiReport::zero();
    }
    #[allow(clippy::cast_precision_loss)]
    let total_f = total as f64;

    // Sentiment ratio.
    let mut label_counts: BTreeMap<Sentiment, usize> = BTreeMap::new();
    for m in &kept {
        let label = m.sentiment.unwrap_or(Sentiment::Neutral);
        *label_counts.entry(label).or_default() += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let sentiment_ratio = label_counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total_f * 100.0))
        .collect();

    // Share of voice over the brief brand plus every discovered brand.
    let mut all_brands: Vec<String> = kept
        .iter()
        .flat_map(|m| m.mentioned_brands.iter().cloned())
        .filter(|b| *b != brief.brand)
        .collect();
    all_brands.sort();
    all_brands.dedup();
    all_brands.insert(0, brief.brand.clone());

    let mut brand_counts: HashMap<&str, usize> = HashMap::new();
    for m in &kept {
        for b in &m.mentioned_brands {
            *brand_counts.entry(b.as_str()).or_default() += 1;
        }
    }
    let sov_total: usize = brand_counts.values().sum();
    #[allow(clippy::cast_precision_loss)]
    let sov = all_brands
        .into_iter()
        .map(|brand| {
            let count = brand_counts.get(brand.as_str()).copied().unwrap_or(0);
            let share_pct = if sov_total == 0 {
                0.0
            } else {
                count as f64 / sov_total as f64 * 100.0
            };
            SovEntry { brand, share_pct }
        })
        .collect();

    // Media Impact Score.
    let mis = kept
        .iter()
        .filter(|m| m.sentiment.is_some_and(Sentiment::is_favorable))
        .map(|m| u64::from(m.authority))
        .sum();

    // Message Penetration Index.
    let mpi = if brief.campaign_messages.is_empty() {
        0.0
    } else {
        let needles: Vec<String> = brief
            .campaign_messages
            .iter()
            .map(|m| m.to_lowercase())
            .collect();
        let matches = kept
            .iter()
            .filter(|m| {
                let text = m.text.to_lowercase();
                needles.iter().any(|n| text.contains(n))
            })
            .count();
        #[allow(clippy::cast_precision_loss)]
        let pct = matches as f64 / total_f * 100.0;
        pct
    };

    // Engagement over the social channel only.
    let social: Vec<&&Mention> = kept
        .iter()
        .filter(|m| m.channel == Channel::Social)
        .collect();
    let engagement_rate = if social.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = social
            .iter()
            .map(|m| (m.likes + m.comments) as f64)
            .sum::<f64>()
            / social.len() as f64;
        mean
    };

    let reach = kept.iter().map(|m| m.reach).sum();

    KpiReport {
        total_mentions: total,
        sentiment_ratio,
        sov,
        mis,
        mpi,
        engagement_rate,
        reach,
    }
}
