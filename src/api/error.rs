//! API error types for the Jira client.

use reqwest::StatusCode;
use thiserror::Error;

use super::types::Transition;

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client configuration is incomplete.
    Configuration,
    /// A required identifier was not supplied; nothing was sent.
    Validation,
    /// The request never got an HTTP response.
    Transport,
    /// The server answered with an error status or an unexpected body.
    Api,
    /// The HTTP calls succeeded but the requested operation cannot proceed.
    Application,
}

/// Errors that can occur when talking to Jira.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A configuration value needed to build the client is missing.
    #[error("Jira {0} is not configured")]
    MissingConfig(&'static str),

    /// A required identifier (issue key, board id, ...) was empty.
    #[error("{0} is required")]
    MissingIdentifier(&'static str),

    /// Network, DNS or timeout failure.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Jira responded with a status >= 400.
    #[error("{}", describe_status(*status, messages))]
    Api { status: u16, messages: Vec<String> },

    /// A successful response could not be decoded.
    #[error("invalid response from Jira: {0}")]
    InvalidResponse(String),

    /// No transition matched the requested name or ID.
    #[error("transition not found: {requested}")]
    TransitionNotFound {
        requested: String,
        available: Vec<Transition>,
    },

    /// The board has no sprint in the `active` state.
    #[error("no active sprint found for board {0}")]
    NoActiveSprint(u64),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingConfig(_) => ErrorKind::Configuration,
            ApiError::MissingIdentifier(_) => ErrorKind::Validation,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Api { .. } | ApiError::InvalidResponse(_) => ErrorKind::Api,
            ApiError::TransitionNotFound { .. } | ApiError::NoActiveSprint(_) => {
                ErrorKind::Application
            }
        }
    }

    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_status(status: u16, messages: &[String]) -> String {
    if messages.is_empty() {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status");
        format!("Jira API error (HTTP {} {})", status, reason)
    } else {
        format!("Jira API error (HTTP {}): {}", status, messages.join("; "))
    }
}
