use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rules: AdminRules,
}

/// Fallback operator login for environments where the identity provider is
/// unreachable. A compatibility shim, not a security boundary: disabled
/// unless a deployment explicitly turns it on.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub fallback_login: bool,
    #[serde(default)]
    pub fallback_email: Option<String>,
    #[serde(default)]
    pub fallback_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
        }
    }
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".parkdesk-session.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminRules {
    /// Window for the dashboard's recent-bookings query.
    #[serde(default = "default_recent_window")]
    pub recent_booking_window_days: i64,
}

impl Default for AdminRules {
    fn default() -> Self {
        Self {
            recent_booking_window_days: default_recent_window(),
        }
    }
}

fn default_recent_window() -> i64 {
    7
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file
            // Default to 'development' env
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of PARKDESK)
            .add_source(config::Environment::with_prefix("PARKDESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
