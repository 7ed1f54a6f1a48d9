//! The `report` subcommand: render markdown, CSV, or PDF to a file.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, ValueEnum};

use flash_core::AppConfig;
use flash_report::{generate_summary, render_csv, render_markdown, render_pdf, ReportInputs};

use crate::run;
use crate::BriefArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    Pdf,
    Csv,
    Markdown,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Csv => "csv",
            ReportFormat::Markdown => "md",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Markdown => "text/markdown",
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    brief: BriefArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Pdf)]
    format: ReportFormat,

    /// Output path; defaults to flash_narrative_report_<brand>.<ext>.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also email the report to this address (requires SMTP configuration).
    #[arg(long)]
    email_to: Option<String>,
}

pub(crate) async fn generate(config: &AppConfig, args: ReportArgs) -> anyhow::Result<()> {
    let brief = args.brief.into_brief()?;
    let run = run::run_pipeline(config, brief).await;

    let inputs = ReportInputs {
        brief: &run.brief,
        kpis: &run.kpis,
        keywords: &run.keywords,
        mentions: &run.mentions,
        generated_at: Utc::now(),
    };

    let bytes = match args.format {
        ReportFormat::Csv => render_csv(&run.mentions).into_bytes(),
        ReportFormat::Markdown => {
            let llm = run::llm_client(config);
            let summary = generate_summary(llm.as_ref(), &inputs).await;
            render_markdown(&inputs, Some(&summary)).into_bytes()
        }
        ReportFormat::Pdf => {
            let llm = run::llm_client(config);
            let summary = generate_summary(llm.as_ref(), &inputs).await;
            render_pdf(&inputs, Some(&summary))?
        }
    };

    let path = args.out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "flash_narrative_report_{}.{}",
            run.brief.brand.replace(' ', "_"),
            args.format.extension()
        ))
    });
    std::fs::write(&path, &bytes)?;
    println!("report written to {}", path.display());

    if let Some(to) = args.email_to {
        let Some(smtp) = &config.smtp else {
            anyhow::bail!("--email-to requires SMTP_USER, SMTP_PASS, and ALERT_EMAIL_TO to be set");
        };
        let notifier = flash_alerts::EmailNotifier::new(smtp)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("report.{}", args.format.extension()));
        notifier
            .send_report(
                &to,
                &format!("Flash Narrative report: {}", run.brief.brand),
                "Attached is the latest Flash Narrative report.",
                &filename,
                args.format.content_type(),
                bytes,
            )
            .await?;
        println!("report emailed to {to}");
    }
    Ok(())
}
