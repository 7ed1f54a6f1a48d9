use crate::app_config::{
    AppConfig, Environment, LlmConfig, ServiceNowConfig, SlackConfig, SmtpConfig, WatchConfig,
};
use crate::ConfigError;

const DEFAULT_LLM_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_LLM_MODELS: &str = "claude-3-5-haiku-latest,claude-3-haiku-20240307";
const DEFAULT_WATCH_CRON: &str = "0 */15 * * * *";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build the configuration from the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the process environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let comma_list = |raw: &str| -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    };

    let env = parse_environment(&or_default("FLASH_ENV", "development"));
    let bind_addr = parse_addr("FLASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FLASH_LOG_LEVEL", "info");

    let newsapi_keys = comma_list(&or_default("NEWSAPI_KEYS", ""));
    let feeds_path = lookup("FLASH_FEEDS_PATH").ok().map(PathBuf::from);
    let cache_dir = PathBuf::from(or_default("FLASH_CACHE_DIR", "./cache"));
    let cache_ttl_minutes = parse_u64("FLASH_CACHE_TTL_MINUTES", "15")?;

    let http_timeout_secs = parse_u64("FLASH_HTTP_TIMEOUT_SECS", "10")?;
    let http_user_agent = or_default("FLASH_HTTP_USER_AGENT", "flash-narrative/0.1 (pr-monitoring)");
    let http_max_retries = parse_u32("FLASH_HTTP_MAX_RETRIES", "2")?;
    let http_retry_backoff_ms = parse_u64("FLASH_HTTP_RETRY_BACKOFF_MS", "500")?;

    let llm = lookup("FLASH_LLM_API_KEY").ok().map(|api_key| LlmConfig {
        api_key,
        base_url: or_default("FLASH_LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
        models: comma_list(&or_default("FLASH_LLM_MODELS", DEFAULT_LLM_MODELS)),
    });

    let slack = lookup("SLACK_TOKEN").ok().map(|token| SlackConfig {
        token,
        channel: or_default("SLACK_CHANNEL", "#alerts"),
    });

    let smtp = match (lookup("SMTP_USER"), lookup("SMTP_PASS"), lookup("ALERT_EMAIL_TO")) {
        (Ok(user), Ok(password), Ok(alert_to)) => Some(SmtpConfig {
            server: or_default("SMTP_SERVER", "smtp.gmail.com"),
            port: parse_u16("SMTP_PORT", "587")?,
            user,
            password,
            alert_to,
        }),
        _ => None,
    };

    let servicenow = match (
        lookup("SERVICENOW_INSTANCE"),
        lookup("SERVICENOW_USER"),
        lookup("SERVICENOW_PASSWORD"),
    ) {
        (Ok(instance), Ok(user), Ok(password)) => Some(ServiceNowConfig {
            instance,
            user,
            password,
        }),
        _ => None,
    };

    let alert_negative_threshold = parse_f64("FLASH_ALERT_NEGATIVE_THRESHOLD", "30")?;

    let watch = match lookup("FLASH_WATCH_BRAND") {
        Ok(brand) if !brand.trim().is_empty() => Some(WatchConfig {
            brand: brand.trim().to_string(),
            competitors: comma_list(&or_default("FLASH_WATCH_COMPETITORS", "")),
            industry: lookup("FLASH_WATCH_INDUSTRY").ok().filter(|s| !s.is_empty()),
            campaign_messages: comma_list(&or_default("FLASH_WATCH_MESSAGES", "")),
            lookback_hours: parse_u32("FLASH_WATCH_HOURS", "24")?,
            cron: or_default("FLASH_WATCH_CRON", DEFAULT_WATCH_CRON),
        }),
        _ => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        newsapi_keys,
        feeds_path,
        cache_dir,
        cache_ttl_minutes,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_ms,
        llm,
        slack,
        smtp,
        servicenow,
        alert_negative_threshold,
        watch,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_working_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.newsapi_keys.is_empty());
        assert_eq!(cfg.cache_ttl_minutes, 15);
        assert!(cfg.llm.is_none());
        assert!(cfg.slack.is_none());
        assert!(cfg.smtp.is_none());
        assert!(cfg.servicenow.is_none());
        assert!(cfg.watch.is_none());
        assert!((cfg.alert_negative_threshold - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn newsapi_keys_are_split_and_trimmed() {
        let mut map = HashMap::new();
        map.insert("NEWSAPI_KEYS", " key-a , key-b ,, ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.newsapi_keys, vec!["key-a", "key-b"]);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let mut map = HashMap::new();
        map.insert("FLASH_BIND_ADDR", "not-an-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLASH_BIND_ADDR"),
            "expected InvalidEnvVar(FLASH_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let mut map = HashMap::new();
        map.insert("FLASH_ALERT_NEGATIVE_THRESHOLD", "thirty");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLASH_ALERT_NEGATIVE_THRESHOLD")
        );
    }

    #[test]
    fn llm_config_requires_api_key() {
        let mut map = HashMap::new();
        map.insert("FLASH_LLM_MODELS", "model-a");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.llm.is_none(), "models without a key should not enable the LLM");

        map.insert("FLASH_LLM_API_KEY", "sk-test");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let llm = cfg.llm.expect("llm enabled");
        assert_eq!(llm.models, vec!["model-a"]);
        assert_eq!(llm.base_url, DEFAULT_LLM_BASE_URL);
    }

    #[test]
    fn llm_models_default_is_ordered() {
        let mut map = HashMap::new();
        map.insert("FLASH_LLM_API_KEY", "sk-test");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let llm = cfg.llm.expect("llm enabled");
        assert_eq!(llm.models.len(), 2);
        assert!(llm.models[0].contains("haiku"));
    }

    #[test]
    fn smtp_requires_user_pass_and_recipient() {
        let mut map = HashMap::new();
        map.insert("SMTP_USER", "alerts@example.com");
        map.insert("SMTP_PASS", "secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.smtp.is_none(), "missing recipient should disable email");

        map.insert("ALERT_EMAIL_TO", "pr@example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let smtp = cfg.smtp.expect("smtp enabled");
        assert_eq!(smtp.server, "smtp.gmail.com");
        assert_eq!(smtp.port, 587);
    }

    #[test]
    fn watch_config_parses_brief_fields() {
        let mut map = HashMap::new();
        map.insert("FLASH_WATCH_BRAND", "BrandX");
        map.insert("FLASH_WATCH_COMPETITORS", "Rival,Other");
        map.insert("FLASH_WATCH_HOURS", "48");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let watch = cfg.watch.expect("watch enabled");
        assert_eq!(watch.brand, "BrandX");
        assert_eq!(watch.competitors, vec!["Rival", "Other"]);
        assert_eq!(watch.lookback_hours, 48);
        assert_eq!(watch.cron, DEFAULT_WATCH_CRON);
    }

    #[test]
    fn blank_watch_brand_disables_watch() {
        let mut map = HashMap::new();
        map.insert("FLASH_WATCH_BRAND", "  ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.watch.is_none());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = HashMap::new();
        map.insert("NEWSAPI_KEYS", "super-secret-key");
        map.insert("FLASH_LLM_API_KEY", "sk-secret");
        map.insert("SLACK_TOKEN", "xoxb-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("xoxb-secret"));
    }
}
