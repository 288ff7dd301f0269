use reqwest::StatusCode;
use thiserror::Error;

/// Fixed message returned to callers for every upstream failure.
pub const UPSTREAM_ERROR_DETAIL: &str = "Error fetching data from Supabase.";

#[derive(Error, Debug)]
pub enum ResumeError {
    /// `body` is logged where the reply is read; `Display` leaves it out.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    #[error("Record {index} is missing column '{column}'")]
    MissingField { column: String, index: usize },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{message}")]
    NotFound { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    NotFound,
    Configuration,
}

impl ResumeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UpstreamStatus { .. }
            | Self::UpstreamTransport(_)
            | Self::MalformedResponse { .. }
            | Self::MissingField { .. }
            | Self::SerializationError(_) => ErrorCategory::Upstream,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::IoError(_)
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_upstream(&self) -> bool {
        self.category() == ErrorCategory::Upstream
    }

    /// Status code surfaced to HTTP callers.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Upstream => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message surfaced to HTTP callers. Never contains upstream text.
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { message } => message.clone(),
            _ if self.is_upstream() => UPSTREAM_ERROR_DETAIL.to_string(),
            _ => "Internal server error.".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("{} is missing. Check your environment variables.", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeError>;
