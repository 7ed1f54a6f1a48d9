//! Threshold-driven recommendation lines for the dashboard and reports.

use flash_core::Sentiment;

use crate::kpis::KpiReport;

/// Produce the advice lines shown under the KPI block.
#[must_use]
pub fn recommendations(kpis: &KpiReport, keywords: &[(String, usize)]) -> Vec<String> {
    let pct = |label: Sentiment| kpis.sentiment_ratio.get(&label).copied().unwrap_or(0.0);
    let negative = pct(Sentiment::Negative) + pct(Sentiment::Anger);
    let positive = pct(Sentiment::Positive) + pct(Sentiment::Appreciation);

    let mut recs = Vec::with_capacity(2);
    recs.push(
        if negative > 50.0 {
            "High negative sentiment: escalate to PR and prioritize sentiment remediation plans."
        } else if negative > 30.0 {
            "Moderate negative sentiment: investigate top negative sources and respond where necessary."
        } else if positive > 60.0 {
            "Strong positive sentiment: capitalize on momentum with promotional pushes."
        } else {
            "Mixed sentiment: monitor trending keywords and refine messaging to lift message penetration."
        }
        .to_string(),
    );

    if let Some((keyword, _)) = keywords.first() {
        recs.push(format!(
            "Consider content or campaign ideas around \"{keyword}\", which is trending in recent coverage."
        ));
    }

    recs
}
