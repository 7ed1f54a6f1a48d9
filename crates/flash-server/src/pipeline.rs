//! The monitoring pipeline: collect → classify → aggregate.
//!
//! Shared by the API handlers and the background watch job. The inline
//! path accepts caller-supplied mentions (the spreadsheet-upload
//! equivalent) and skips collection entirely.

use chrono::Utc;

use flash_analysis::{compute_kpis, extract_keywords, recommendations, KpiReport};
use flash_core::{AppConfig, Mention, MonitorBrief};
use flash_sentiment::{classify_mentions, ClassifyOutcome, LlmClient};

pub struct PipelineRun {
    pub brief: MonitorBrief,
    pub mentions: Vec<Mention>,
    pub kpis: KpiReport,
    pub keywords: Vec<(String, usize)>,
    pub recommendations: Vec<String>,
    pub classify: ClassifyOutcome,
}

pub async fn run_pipeline(
    config: &AppConfig,
    brief: MonitorBrief,
    inline_mentions: Option<Vec<Mention>>,
) -> PipelineRun {
    let mut mentions = match inline_mentions {
        Some(provided) => {
            tracing::info!(count = provided.len(), "using caller-supplied mentions");
            provided
        }
        None => flash_sources::collect_mentions(config, &brief).await,
    };

    let llm = llm_client(config);
    let classify = classify_mentions(llm.as_ref(), &mut mentions).await;

    let kpis = compute_kpis(&mentions, &brief, Utc::now());
    let all_text = mentions
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let keywords = extract_keywords(&all_text, flash_analysis::DEFAULT_TOP_KEYWORDS);
    let recommendations = recommendations(&kpis, &keywords);

    PipelineRun {
        brief,
        mentions,
        kpis,
        keywords,
        recommendations,
        classify,
    }
}

pub fn llm_client(config: &AppConfig) -> Option<LlmClient> {
    config
        .llm
        .as_ref()
        .map(|c| LlmClient::new(reqwest::Client::new(), c))
}
