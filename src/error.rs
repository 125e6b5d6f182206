//! Top-level error type for the `jtk` binary.
//!
//! Components return their own errors; this enum gathers them so `main` is
//! the single place that reports a failure and picks the exit status.

use thiserror::Error;

use crate::api::{ApiError, ErrorKind};
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Jira API errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (writing output, reading input).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command-line input that clap could not catch.
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        AppError::Usage(msg.into())
    }

    /// Get a suggested next step for the user, if there is an obvious one.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_)) => {
                Some("Fix the file shown by 'jtk config show' or run 'jtk config clear'.")
            }
            AppError::Api(ApiError::MissingConfig(_)) => Some(
                "Run 'jtk config set --domain <site> --email <email> --token <token>' \
                 or set JIRA_DOMAIN, JIRA_EMAIL and JIRA_API_TOKEN.",
            ),
            AppError::Api(e) if e.status() == Some(401) => Some(
                "Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens",
            ),
            AppError::Api(ApiError::TransitionNotFound { .. }) => {
                Some("Run 'jtk transitions list <issue-key>' to see valid transitions.")
            }
            AppError::Api(e) if e.kind() == ErrorKind::Transport => {
                Some("Check your internet connection and Jira domain.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
