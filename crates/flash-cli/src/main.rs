mod report;
mod run;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "flash-cli")]
#[command(about = "Flash Narrative command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the monitoring pipeline and print the KPI summary.
    Monitor(BriefArgs),
    /// Run the pipeline and write a report file.
    Report(report::ReportArgs),
}

/// Shared brief flags for both subcommands.
#[derive(Debug, Args)]
pub(crate) struct BriefArgs {
    /// Brand to monitor.
    #[arg(long)]
    brand: String,

    /// Competitor brands, comma-separated.
    #[arg(long, value_delimiter = ',')]
    competitors: Vec<String>,

    /// Industry slug for the RSS feed table (tech, finance, ...).
    #[arg(long)]
    industry: Option<String>,

    /// Campaign messages to score penetration against, comma-separated.
    #[arg(long = "messages", value_delimiter = ',')]
    campaign_messages: Vec<String>,

    /// Lookback window in hours (1-168).
    #[arg(long, default_value_t = 24)]
    hours: u32,
}

impl BriefArgs {
    fn into_brief(self) -> Result<flash_core::MonitorBrief, flash_core::BriefError> {
        flash_core::MonitorBrief::new(
            &self.brand,
            self.competitors,
            self.industry,
            self.campaign_messages,
            self.hours,
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = flash_core::load_app_config_from_env()?;
    let cli = Cli::parse();
    match cli.command {
        Commands::Monitor(args) => run::monitor(&config, args.into_brief()?).await,
        Commands::Report(args) => report::generate(&config, args).await,
    }
}
