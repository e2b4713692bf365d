//! Error type for remote collaborator calls.

use std::error::Error;
use std::fmt;

/// Error type for service operations.
///
/// Callers surface these as transient user-facing notifications and
/// re-trigger the action manually; nothing here is retried.
#[derive(Debug)]
pub enum ServiceError {
    /// The target resource does not exist on the backend.
    NotFound(String),
    /// The backend rejected the request (validation, state conflict).
    Rejected(String),
    /// Response payload decode failed.
    DecodeFailed(String),
    /// Transport-level failure (connection, timeout, server fault).
    Transport(String),
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(what) => write!(f, "not found: {}", what),
            ServiceError::Rejected(msg) => write!(f, "rejected: {}", msg),
            ServiceError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            ServiceError::Transport(msg) => write!(f, "transport error: {}", msg),
            ServiceError::Other(e) => write!(f, "service error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::DecodeFailed(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::DecodeFailed(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}
