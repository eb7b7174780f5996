use thiserror::Error;

/// Unified error type for release-notify operations
#[derive(Error, Debug)]
pub enum ReleaseNotifyError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid repository URL: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-notify
pub type Result<T> = std::result::Result<T, ReleaseNotifyError>;

/// Coarse classification used by the top-level handler when printing
/// the final one-line failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Value,
    Unexpected,
}

impl ReleaseNotifyError {
    /// Create a format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseNotifyError::Format(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotifyError::Config(msg.into())
    }

    /// Classify this error for user-facing reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReleaseNotifyError::Git(_) | ReleaseNotifyError::Http(_) => ErrorCategory::Network,
            ReleaseNotifyError::Format(_) | ReleaseNotifyError::Config(_) => ErrorCategory::Value,
            ReleaseNotifyError::Io(_) | ReleaseNotifyError::Json(_) => ErrorCategory::Unexpected,
        }
    }
}
