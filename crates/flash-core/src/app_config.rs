use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Hosted-model endpoint settings. Absent when no API key is configured,
/// in which case classification runs on the keyword rules alone.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    /// Models tried in order until one answers.
    pub models: Vec<String>,
}

#[derive(Clone)]
pub struct SlackConfig {
    pub token: String,
    pub channel: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub alert_to: String,
}

#[derive(Clone)]
pub struct ServiceNowConfig {
    pub instance: String,
    pub user: String,
    pub password: String,
}

/// Standing monitoring target for the background watch job.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub brand: String,
    pub competitors: Vec<String>,
    pub industry: Option<String>,
    pub campaign_messages: Vec<String>,
    pub lookback_hours: u32,
    /// Six-field cron expression, seconds first.
    pub cron: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// NewsAPI keys tried in rotation; empty disables the source.
    pub newsapi_keys: Vec<String>,
    /// Optional YAML file overriding the built-in industry feed table.
    pub feeds_path: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub cache_ttl_minutes: u64,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_ms: u64,
    pub llm: Option<LlmConfig>,
    pub slack: Option<SlackConfig>,
    pub smtp: Option<SmtpConfig>,
    pub servicenow: Option<ServiceNowConfig>,
    /// Negative-share percentage at which an alert fires.
    pub alert_negative_threshold: f64,
    pub watch: Option<WatchConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("newsapi_keys", &format!("[{} redacted]", self.newsapi_keys.len()))
            .field("feeds_path", &self.feeds_path)
            .field("cache_dir", &self.cache_dir)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field("http_retry_backoff_ms", &self.http_retry_backoff_ms)
            .field("llm", &self.llm.as_ref().map(|l| l.models.join(",")))
            .field("slack", &self.slack.as_ref().map(|s| s.channel.clone()))
            .field("smtp", &self.smtp.as_ref().map(|s| s.server.clone()))
            .field(
                "servicenow",
                &self.servicenow.as_ref().map(|s| s.instance.clone()),
            )
            .field("alert_negative_threshold", &self.alert_negative_threshold)
            .field("watch", &self.watch)
            .finish()
    }
}
