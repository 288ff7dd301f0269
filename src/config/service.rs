use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ResumeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_TABLE: &str = "resume";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RETRY_DELAY_MILLIS: u64 = 500;

/// Connection settings for the upstream Supabase REST endpoint.
#[derive(Clone)]
pub struct ServiceConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub table: String,
    pub request_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl ServiceConfig {
    pub fn new(supabase_url: impl Into<String>, supabase_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            supabase_key: supabase_key.into(),
            table: DEFAULT_TABLE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            retry_attempts: 0,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MILLIS),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. `SUPABASE_URL` and
    /// `SUPABASE_KEY` are required; everything else falls back to defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = get("SUPABASE_URL");
        let key = get("SUPABASE_KEY");
        let mut config = Self::new(
            validate_required_field("SUPABASE_URL", &url)?.trim_end_matches('/'),
            validate_required_field("SUPABASE_KEY", &key)?.as_str(),
        );

        if let Some(table) = get("SUPABASE_TABLE") {
            config.table = table;
        }
        if let Some(raw) = get("SUPABASE_TIMEOUT_SECONDS") {
            config.request_timeout = Duration::from_secs(parse_number("SUPABASE_TIMEOUT_SECONDS", &raw)?);
        }
        if let Some(raw) = get("SUPABASE_RETRY_ATTEMPTS") {
            config.retry_attempts = parse_number("SUPABASE_RETRY_ATTEMPTS", &raw)?;
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ResumeError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Expected a non-negative integer".to_string(),
        })
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"***")
            .field("table", &self.table)
            .field("request_timeout", &self.request_timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl ConfigProvider for ServiceConfig {
    fn base_url(&self) -> &str {
        &self.supabase_url
    }

    fn api_key(&self) -> &str {
        &self.supabase_key
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("supabase_url", &self.supabase_url)?;
        validate_non_empty_string("supabase_key", &self.supabase_key)?;
        validate_non_empty_string("table", &self.table)?;
        validate_range(
            "request_timeout_seconds",
            self.request_timeout.as_secs(),
            1,
            300,
        )?;
        validate_range("retry_attempts", self.retry_attempts, 0, 5)?;

        tracing::debug!("Service configuration validation passed");
        Ok(())
    }
}
