//! Structured error types for resolver operations.
//!
//! A missing section or entry is never an error; lookups return `Ok(None)`.
//! Everything here describes input that was present but unusable.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Malformed endpoint input
    InvalidUri,
    MissingHost,
    InvalidHost,
    InvalidPort,

    // Malformed tree input
    MalformedSpec,
    StoredDbUri,
    MissingField,

    // Database resolution
    UnknownService,
    ProvisionFailed,
}

/// Errors raised while resolving endpoints or databases.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("endpoint '{name}' has an unparseable uri '{uri}': {reason}")]
    InvalidUri {
        name: String,
        uri: String,
        reason: String,
    },

    #[error("endpoint '{name}' has neither a uri nor a host")]
    MissingHost { name: String },

    #[error("endpoint '{name}' has an invalid host '{host}'")]
    InvalidHost { name: String, host: String },

    #[error("'{name}' has an invalid port '{value}'")]
    InvalidPort { name: String, value: String },

    #[error("'{path}' is malformed: {reason}")]
    MalformedSpec { path: String, reason: String },

    #[error("database entry for '{service}' stores a uri; connection uris must not be persisted")]
    StoredDbUri { service: String },

    #[error("database entry for '{service}' is missing '{field}'")]
    MissingField { service: String, field: &'static str },

    #[error("unknown service '{0}': no database name is registered for it")]
    UnknownService(String),

    /// A provisioner failure, passed through unmodified.
    #[error(transparent)]
    Provision(anyhow::Error),
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::InvalidUri { .. } => ErrorCode::InvalidUri,
            ResolveError::MissingHost { .. } => ErrorCode::MissingHost,
            ResolveError::InvalidHost { .. } => ErrorCode::InvalidHost,
            ResolveError::InvalidPort { .. } => ErrorCode::InvalidPort,
            ResolveError::MalformedSpec { .. } => ErrorCode::MalformedSpec,
            ResolveError::StoredDbUri { .. } => ErrorCode::StoredDbUri,
            ResolveError::MissingField { .. } => ErrorCode::MissingField,
            ResolveError::UnknownService(_) => ErrorCode::UnknownService,
            ResolveError::Provision(_) => ErrorCode::ProvisionFailed,
        }
    }

    // Convenience constructors

    pub fn invalid_uri(name: &str, uri: &str, reason: impl Into<String>) -> Self {
        ResolveError::InvalidUri {
            name: name.to_string(),
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ResolveError::MalformedSpec {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_port(name: &str, value: impl std::fmt::Display) -> Self {
        ResolveError::InvalidPort {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// JSON-friendly error body for CLI output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ResolveError> for ErrorReport {
    fn from(err: &ResolveError) -> Self {
        let details = std::error::Error::source(err).map(|source| format!("{:#}", source));
        Self {
            code: err.code(),
            message: err.to_string(),
            details,
        }
    }
}

/// Result type for resolver operations.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
