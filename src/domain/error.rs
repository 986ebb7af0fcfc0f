use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}

/// Classification of a failed advertisement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Caller error, detected before any network traffic.
    InvalidInput,
    /// Connection error or timeout.
    NetworkError,
    /// Non-success HTTP status.
    RemoteError,
    /// Body is not JSON or lacks the expected shape.
    MalformedResponse,
    /// Platform answered with `success: false`.
    RemoteRejected,
}

impl FailureKind {
    /// Whether the next scheduled run may reasonably expect a different outcome.
    pub fn is_transient(&self) -> bool {
        matches!(self, FailureKind::NetworkError)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidInput => write!(f, "invalid input"),
            FailureKind::NetworkError => write!(f, "network error"),
            FailureKind::RemoteError => write!(f, "remote error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::RemoteRejected => write!(f, "remote rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct SearchError {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidInput, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NetworkError, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RemoteError, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedResponse, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RemoteRejected, message)
    }
}
