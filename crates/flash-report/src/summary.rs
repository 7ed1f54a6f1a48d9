//! Executive-summary generation for reports.
//!
//! Condenses the run into a short data block, hands it to the hosted model,
//! and falls back to a static note when no model is configured or every
//! model fails.

use flash_core::Sentiment;
use flash_sentiment::LlmClient;

use crate::ReportInputs;

const FALLBACK_SUMMARY: &str = "**Summary:**\n\
* Automated summary unavailable for this run.\n\
* Review the KPI block and sentiment distribution above.\n\n\
**Recommendations:**\n\
* Monitor the trending keywords for emerging narratives.\n\
* Watch the negative-sentiment share against the alert threshold.";

const HEADLINE_SAMPLE: usize = 3;

/// Condensed run description fed to the summarizer prompt.
#[must_use]
pub fn build_data_summary(inputs: &ReportInputs<'_>) -> String {
    let kpis = inputs.kpis;

    let ratio = kpis
        .sentiment_ratio
        .iter()
        .map(|(label, pct)| format!("{label} {pct:.1}%"))
        .collect::<Vec<_>>()
        .join(", ");

    let keywords = inputs
        .keywords
        .iter()
        .map(|(k, _)| k.clone())
        .collect::<Vec<_>>()
        .join(", ");

    let headlines = |pred: fn(Sentiment) -> bool| -> String {
        inputs
            .mentions
            .iter()
            .filter(|m| m.sentiment.is_some_and(pred))
            .take(HEADLINE_SAMPLE)
            .map(|m| format!("- {}", m.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Brand: {}\n\
         Total mentions: {}\n\
         Sentiment Ratio: {ratio}\n\
         Top Keywords: {keywords}\n\
         Favorable headlines:\n{}\n\
         Unfavorable headlines:\n{}",
        inputs.brief.brand,
        kpis.total_mentions,
        headlines(Sentiment::is_favorable),
        headlines(Sentiment::is_unfavorable),
    )
}

/// Model-written summary with a static fallback. Never fails.
pub async fn generate_summary(client: Option<&LlmClient>, inputs: &ReportInputs<'_>) -> String {
    let Some(llm) = client else {
        return FALLBACK_SUMMARY.to_string();
    };
    let data = build_data_summary(inputs);
    match llm.summarize_report(&inputs.brief.brand, &data).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "report summary generation failed, using fallback");
            FALLBACK_SUMMARY.to_string()
        }
    }
}
