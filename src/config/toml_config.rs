use crate::config::service::{ServiceConfig, DEFAULT_RETRY_DELAY_MILLIS, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{ResumeError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub url: String,
    pub key: String,
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_millis: Option<u64>,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("key", &"***")
            .field("table", &self.table)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_millis", &self.retry_delay_millis)
            .finish()
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ResumeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ResumeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn host(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.host.as_deref())
    }

    pub fn port(&self) -> Option<u16> {
        self.server.as_ref().and_then(|s| s.port)
    }

    /// 轉換為上游連線設定；仍含 `${VAR}` 的必填欄位視為缺漏
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let upstream = &self.upstream;
        let url = required("upstream.url", &upstream.url)?;
        let key = required("upstream.key", &upstream.key)?;

        let config = ServiceConfig {
            supabase_url: url.trim_end_matches('/').to_string(),
            supabase_key: key.to_string(),
            table: upstream
                .table
                .clone()
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            request_timeout: Duration::from_secs(
                upstream.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
            retry_attempts: upstream.retry_attempts.unwrap_or(0),
            retry_delay: Duration::from_millis(
                upstream.retry_delay_millis.unwrap_or(DEFAULT_RETRY_DELAY_MILLIS),
            ),
        };

        Ok(config)
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() || env_var_pattern().is_match(value) {
        return Err(ResumeError::MissingConfigError {
            field: field.to_string(),
        });
    }
    Ok(value)
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.service_config()?.validate()
    }
}
