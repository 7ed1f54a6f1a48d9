//! Pipeline driver and terminal output for the `monitor` subcommand.

use chrono::Utc;

use flash_analysis::{compute_kpis, extract_keywords, recommendations, KpiReport};
use flash_core::{AppConfig, Mention, MonitorBrief};
use flash_sentiment::{classify_mentions, ClassifyOutcome, LlmClient};

pub(crate) struct PipelineRun {
    pub brief: MonitorBrief,
    pub mentions: Vec<Mention>,
    pub kpis: KpiReport,
    pub keywords: Vec<(String, usize)>,
    pub recommendations: Vec<String>,
    pub classify: ClassifyOutcome,
}

pub(crate) async fn run_pipeline(config: &AppConfig, brief: MonitorBrief) -> PipelineRun {
    let mut mentions = flash_sources::collect_mentions(config, &brief).await;

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

pub(crate) fn llm_client(config: &AppConfig) -> Option<LlmClient> {
    config
        .llm
        .as_ref()
        .map(|c| LlmClient::new(reqwest::Client::new(), c))
}

pub(crate) async fn monitor(config: &AppConfig, brief: MonitorBrief) -> anyhow::Result<()> {
    let run = run_pipeline(config, brief).await;
    let kpis = &run.kpis;

    println!("Flash Narrative: {}", run.brief.brand);
    println!(
        "Window: last {} hours   Mentions: {} (llm {}, rules {})",
        run.brief.lookback_hours,
        kpis.total_mentions,
        run.classify.llm_labeled,
        run.classify.rule_labeled
    );
    println!(
        "MIS {}   MPI {:.1}%   Engagement {:.1}   Reach {}",
        kpis.mis, kpis.mpi, kpis.engagement_rate, kpis.reach
    );

    println!("\nSentiment ratio:");
    if kpis.sentiment_ratio.is_empty() {
        println!("  (no mentions in window)");
    }
    for (label, pct) in &kpis.sentiment_ratio {
        println!("  {label:<13} {pct:>5.1}%");
    }

    println!("\nShare of voice:");
    for entry in &kpis.sov {
        println!("  {:<20} {:>5.1}%", entry.brand, entry.share_pct);
    }

    println!("\nTop keywords:");
    if run.keywords.is_empty() {
        println!("  (none identified)");
    }
    for (keyword, freq) in &run.keywords {
        println!("  {keyword}: {freq}");
    }

    println!("\nRecommendations:");
    for rec in &run.recommendations {
        println!("  - {rec}");
    }

    Ok(())
}
