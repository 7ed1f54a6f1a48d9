//! Background watch job.
//!
//! When a watch brand is configured, a recurring job runs the full pipeline
//! and pushes an alert whenever the negative share crosses the threshold.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use flash_alerts::AlertDispatcher;
use flash_core::{AppConfig, MonitorBrief};

use crate::pipeline;

/// Builds and starts the watch scheduler, or returns `None` when no watch
/// brand is configured. The returned handle must be kept alive for the
/// lifetime of the process; dropping it shuts down the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    config: Arc<AppConfig>,
) -> Result<Option<JobScheduler>, JobSchedulerError> {
    let Some(watch) = config.watch.clone() else {
        tracing::info!("FLASH_WATCH_BRAND not set; background watch disabled");
        return Ok(None);
    };

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(watch.cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        Box::pin(async move {
            tracing::info!("scheduler: starting watch run");
            run_watch_job(&config).await;
            tracing::info!("scheduler: watch run complete");
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(brand = %watch.brand, cron = %watch.cron, "background watch scheduled");
    Ok(Some(scheduler))
}

/// One watch iteration: pipeline, threshold check, dispatch.
async fn run_watch_job(config: &AppConfig) {
    let Some(watch) = &config.watch else { return };

    let brief = match MonitorBrief::new(
        &watch.brand,
        watch.competitors.clone(),
        watch.industry.clone(),
        watch.campaign_messages.clone(),
        watch.lookback_hours,
    ) {
        Ok(brief) => brief,
        Err(e) => {
            tracing::error!(error = %e, "watch brief invalid, skipping run");
            return;
        }
    };

    let run = pipeline::run_pipeline(config, brief, None).await;

    match flash_alerts::evaluate(&run.kpis, &run.brief.brand, config.alert_negative_threshold) {
        Some(event) => {
            tracing::warn!(
                brand = %event.brand,
                negative_share = event.negative_share,
                "negative-sentiment threshold crossed"
            );
            let report = AlertDispatcher::from_config(config).dispatch(&event).await;
            tracing::info!(
                slack = report.slack_sent,
                email = report.email_sent,
                incident = report.incident_number.as_deref().unwrap_or("-"),
                "alert dispatch finished"
            );
        }
        None => {
            tracing::info!(
                brand = %run.brief.brand,
                negative_share = run.kpis.negative_share(),
                "watch run below alert threshold"
            );
        }
    }
}
