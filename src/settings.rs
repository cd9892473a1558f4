use crate::data_retrieval::match_scanner::{
    FailurePolicy, ScanSettings, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE,
};
use crate::types::Region;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "duostats.toml";
const ENV_PREFIX: &str = "DUOSTATS";
const API_KEY_ENV: &str = "RGAPI";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub region: Region,
    /// `{region}` is substituted with the configured region.
    pub api_host: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub failure_policy: FailurePolicy,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Settings {
    /// Defaults, then the optional settings file, then `DUOSTATS_*` variables.
    /// The API key falls back to `RGAPI` when not set anywhere else.
    pub fn load(config_file: &str) -> Result<Settings, config::ConfigError> {
        let raw = config::Config::builder()
            .set_default("api_key", "")?
            .set_default("region", "na1")?
            .set_default("api_host", "https://{region}.api.riotgames.com")?
            .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("request_timeout_secs", 30)?
            .set_default("failure_policy", "abort")?
            .set_default("max_retries", DEFAULT_MAX_RETRIES as i64)?
            .set_default("retry_delay_ms", 1000)?
            .set_default("log_level", "info")?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        let mut settings: Settings = raw.try_deserialize()?;
        if settings.api_key.is_empty() {
            settings.api_key = env::var(API_KEY_ENV).unwrap_or_default();
        }
        if settings.page_size == 0 {
            return Err(config::ConfigError::Message(
                "page_size must be positive".to_string(),
            ));
        }
        Ok(settings)
    }

    pub fn base_url(&self) -> String {
        self.api_host.replace("{region}", &self.region)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            page_size: self.page_size,
            policy: self.failure_policy,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
