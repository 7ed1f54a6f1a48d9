use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Slack(String),

    #[error("email error: {0}")]
    Email(String),

    #[error("ServiceNow error: {0}")]
    ServiceNow(String),
}
