//! Markdown rendition of the report.

use crate::ReportInputs;

#[must_use]
pub fn render_markdown(inputs: &ReportInputs<'_>, summary: Option<&str>) -> String {
    let brief = inputs.brief;
    let kpis = inputs.kpis;
    let generated_on = inputs.generated_at.format("%Y-%m-%d %H:%M UTC");

    let mut lines = vec![
        format!("# Flash Narrative Report for {}\n", brief.brand),
        format!(
            "*This report covers the last {} hours.*\n",
            brief.lookback_hours
        ),
        format!("**Generated on:** {generated_on}\n"),
        "## Overview\n".to_string(),
        "This report summarizes the brand's PR performance: sentiment, visibility, \
         and engagement across the monitored sources.\n"
            .to_string(),
        "## Key Performance Indicators\n".to_string(),
        format!("- **Total Mentions**: {}", kpis.total_mentions),
        format!("- **MIS**: {}", kpis.mis),
        format!("- **MPI**: {:.1}%", kpis.mpi),
        format!("- **Engagement Rate**: {:.1}", kpis.engagement_rate),
        format!("- **Reach/Impressions**: {}", kpis.reach),
    ];

    lines.push("\n### Sentiment Ratio\n".to_string());
    if kpis.sentiment_ratio.is_empty() {
        lines.push("- No labelled mentions in the window.".to_string());
    } else {
        for (label, pct) in &kpis.sentiment_ratio {
            lines.push(format!("- {label}: {pct:.1}%"));
        }
    }

    lines.push("\n### Share of Voice\n| Brand | SOV (%) |\n|---|---|".to_string());
    if kpis.sov.is_empty() {
        lines.push(format!("| {} | 0.0 |", brief.brand));
    } else {
        for entry in &kpis.sov {
            lines.push(format!("| {} | {:.1} |", entry.brand, entry.share_pct));
        }
    }

    lines.push("\n## Top Keywords / Themes\n".to_string());
    if inputs.keywords.is_empty() {
        lines.push("- No keywords identified.".to_string());
    } else {
        for (keyword, freq) in inputs.keywords {
            lines.push(format!("- {keyword}: {freq}"));
        }
    }

    if let Some(text) = summary {
        lines.push("\n## AI Summary\n".to_string());
        lines.push(text.to_string());
    }

    lines.join("\n")
}
