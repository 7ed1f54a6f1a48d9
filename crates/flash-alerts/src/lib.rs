//! Negative-sentiment alerting.
//!
//! [`evaluate`] decides whether a run's KPI report crosses the alert
//! threshold; [`AlertDispatcher`] delivers the alert over whatever channels
//! are configured: Slack first, email as the fallback, plus a ServiceNow
//! incident when an instance is wired up. With nothing configured the alert
//! is logged and dispatch still succeeds.

mod email;
mod error;
mod servicenow;
mod slack;

pub use email::EmailNotifier;
pub use error::AlertError;
pub use servicenow::ServiceNowClient;
pub use slack::SlackNotifier;

use flash_analysis::KpiReport;
use flash_core::AppConfig;

/// A fired alert, ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub brand: String,
    pub negative_share: f64,
    pub total_mentions: usize,
    pub message: String,
}

/// What dispatch managed to deliver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub slack_sent: bool,
    pub email_sent: bool,
    pub incident_number: Option<String>,
}

/// Fire an alert when the combined negative + anger share reaches
/// `threshold_pct` and the window actually contains mentions.
#[must_use]
pub fn evaluate(kpis: &KpiReport, brand: &str, threshold_pct: f64) -> Option<AlertEvent> {
    if kpis.total_mentions == 0 {
        return None;
    }
    let negative_share = kpis.negative_share();
    if negative_share < threshold_pct {
        return None;
    }
    Some(AlertEvent {
        brand: brand.to_string(),
        negative_share,
        total_mentions: kpis.total_mentions,
        message: format!(
            "Negative sentiment alert for {brand}: {negative_share:.1}% of {} mentions \
             are negative or angry (threshold {threshold_pct:.0}%).",
            kpis.total_mentions
        ),
    })
}

/// Best-effort delivery over the configured channels.
pub struct AlertDispatcher {
    slack: Option<SlackNotifier>,
    email: Option<EmailNotifier>,
    servicenow: Option<ServiceNowClient>,
}

impl AlertDispatcher {
    /// Build the dispatcher from whatever integrations the config carries.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let slack = config
            .slack
            .as_ref()
            .map(|c| SlackNotifier::new(reqwest::Client::new(), &c.token, &c.channel));
        let email = config.smtp.as_ref().and_then(|c| match EmailNotifier::new(c) {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::warn!(error = %e, "SMTP transport setup failed, email alerts disabled");
                None
            }
        });
        let servicenow = config.servicenow.as_ref().map(|c| {
            ServiceNowClient::new(reqwest::Client::new(), &c.instance, &c.user, &c.password)
        });
        Self {
            slack,
            email,
            servicenow,
        }
    }

    #[must_use]
    pub fn with_channels(
        slack: Option<SlackNotifier>,
        email: Option<EmailNotifier>,
        servicenow: Option<ServiceNowClient>,
    ) -> Self {
        Self {
            slack,
            email,
            servicenow,
        }
    }

    /// Deliver the event. Slack first; email only when Slack is absent or
    /// failed; ServiceNow always when configured. Failures are logged, the
    /// report records what got through.
    pub async fn dispatch(&self, event: &AlertEvent) -> DispatchReport {
        let mut report = DispatchReport::default();

        if let Some(slack) = &self.slack {
            match slack.post(&event.message).await {
                Ok(()) => {
                    tracing::info!(brand = %event.brand, "Slack alert sent");
                    report.slack_sent = true;
                }
                Err(e) => tracing::warn!(error = %e, "Slack alert failed"),
            }
        }

        if !report.slack_sent {
            if let Some(email) = &self.email {
                let subject = format!("Flash Narrative alert: {}", event.brand);
                match email.send(&subject, &event.message).await {
                    Ok(()) => {
                        tracing::info!(brand = %event.brand, "email alert sent");
                        report.email_sent = true;
                    }
                    Err(e) => tracing::warn!(error = %e, "email alert failed"),
                }
            }
        }

        if let Some(servicenow) = &self.servicenow {
            let title = format!("Negative sentiment spike: {}", event.brand);
            match servicenow.create_incident(&title, &event.message).await {
                Ok(number) => {
                    tracing::info!(incident = %number, "ServiceNow incident opened");
                    report.incident_number = Some(number);
                }
                Err(e) => tracing::warn!(error = %e, "ServiceNow incident creation failed"),
            }
        }

        if !report.slack_sent && !report.email_sent && report.incident_number.is_none() {
            tracing::warn!(alert = %event.message, "no alert channel configured or reachable");
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flash_core::Sentiment;
    use std::collections::BTreeMap;

    fn report(total: usize, ratio: &[(Sentiment, f64)]) -> KpiReport {
        KpiReport {
            total_mentions: total,
            sentiment_ratio: ratio.iter().copied().collect::<BTreeMap<_, _>>(),
            sov: vec![],
            mis: 0,
            mpi: 0.0,
            engagement_rate: 0.0,
            reach: 0,
        }
    }

    #[test]
    fn fires_when_negative_share_reaches_threshold() {
        let kpis = report(20, &[(Sentiment::Negative, 25.0), (Sentiment::Anger, 10.0)]);
        let event = evaluate(&kpis, "BrandX", 30.0).expect("alert fires");
        assert!((event.negative_share - 35.0).abs() < 1e-9);
        assert!(event.message.contains("BrandX"));
        assert!(event.message.contains("35.0%"));
    }

    #[test]
    fn stays_quiet_below_threshold() {
        let kpis = report(20, &[(Sentiment::Negative, 20.0)]);
        assert!(evaluate(&kpis, "BrandX", 30.0).is_none());
    }

    #[test]
    fn exact_threshold_fires() {
        let kpis = report(20, &[(Sentiment::Negative, 30.0)]);
        assert!(evaluate(&kpis, "BrandX", 30.0).is_some());
    }

    #[test]
    fn empty_window_never_fires() {
        let kpis = report(0, &[]);
        assert!(evaluate(&kpis, "BrandX", 0.0).is_none());
    }

    #[tokio::test]
    async fn dispatch_with_no_channels_logs_and_returns_empty_report() {
        let dispatcher = AlertDispatcher::with_channels(None, None, None);
        let event = AlertEvent {
            brand: "BrandX".to_string(),
            negative_share: 40.0,
            total_mentions: 10,
            message: "test alert".to_string(),
        };
        let report = dispatcher.dispatch(&event).await;
        assert_eq!(report, DispatchReport::default());
    }
}
