//! Error types for relaybot.

use strum::Display;
use thiserror::Error;

/// Primary error type for all relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Broad error category, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Transport,
    Timeout,
    ClientStatus,
    ServerStatus,
    MalformedResponse,
    Validation,
    Configuration,
    Platform,
}

impl RelayError {
    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Status { status, .. } => match status {
                500..=599 => ErrorCategory::ServerStatus,
                _ => ErrorCategory::ClientStatus,
            },
            Self::MalformedResponse(_) => ErrorCategory::MalformedResponse,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Configuration(_) | Self::Io(_) | Self::Toml(_) => ErrorCategory::Configuration,
            Self::Platform(_) => ErrorCategory::Platform,
        }
    }

    /// Whether a later attempt could plausibly succeed.
    ///
    /// Nothing in the crate retries; this only feeds log output.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transport | ErrorCategory::Timeout | ErrorCategory::ServerStatus
        ) || self.status_code() == Some(429)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RelayError>;
