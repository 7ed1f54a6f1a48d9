//! Report generation: markdown, PDF, and spreadsheet renditions of one
//! monitoring run, plus the optional model-written executive summary.

mod csv;
mod markdown;
mod pdf;
mod summary;

pub use csv::render_csv;
pub use markdown::render_markdown;
pub use pdf::render_pdf;
pub use summary::{build_data_summary, generate_summary};

use chrono::{DateTime, Utc};
use thiserror::Error;

use flash_analysis::KpiReport;
use flash_core::{Mention, MonitorBrief};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF generation error: {0}")]
    Pdf(String),
}

/// Everything a renderer needs about one monitoring run.
pub struct ReportInputs<'a> {
    pub brief: &'a MonitorBrief,
    pub kpis: &'a KpiReport,
    pub keywords: &'a [(String, usize)],
    pub mentions: &'a [Mention],
    pub generated_at: DateTime<Utc>,
}

/// Machine-readable bundle of the whole run, for API consumers that want
/// to render their own report.
#[must_use]
pub fn json_summary(inputs: &ReportInputs<'_>, summary: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "generated_on": inputs.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        "brand": inputs.brief.brand,
        "timeframe_hours": inputs.brief.lookback_hours,
        "competitors": inputs.brief.competitors,
        "kpis": inputs.kpis,
        "top_keywords": inputs.keywords,
        "llm_summary": summary,
    })
}
