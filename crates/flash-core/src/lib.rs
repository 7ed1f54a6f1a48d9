//! Shared types and configuration for Flash Narrative.
//!
//! Holds the `Mention` record that flows through every pipeline stage, the
//! `MonitorBrief` input form, the source authority/reach tables, and the
//! env-driven application configuration.

mod app_config;
mod authority;
mod brief;
mod config;
mod mention;
mod text;

pub use app_config::{
    AppConfig, Environment, LlmConfig, ServiceNowConfig, SlackConfig, SmtpConfig, WatchConfig,
};
pub use authority::{source_authority, source_reach};
pub use brief::{BriefError, MonitorBrief};
pub use config::{load_app_config, load_app_config_from_env};
pub use mention::{Channel, Mention, Sentiment};
pub use text::{clean_text, domain_from_url};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
