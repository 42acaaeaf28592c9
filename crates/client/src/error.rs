//! Unified error taxonomy for the storefront client.
//!
//! Every failure in the client is classified into one [`AppError`] carrying a
//! kind, a message, optional structured details, a creation timestamp, and a
//! `retryable` flag the retry envelope consults. Persistence failures never
//! leave the persistence adapter; the only `AppError` a caller sees comes out
//! of the retry envelope on the catalog fetch path.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity failure (DNS, connect, timeout).
    Network,
    /// The remote endpoint answered with a non-success response.
    Api,
    /// Input failed validation.
    Validation,
    /// Device-local storage failed.
    Storage,
    /// Cart operation failure.
    Cart,
    /// Anything that fits no other kind.
    Unknown,
}

impl ErrorKind {
    /// Default `retryable` flag for this kind.
    ///
    /// Network and storage failures are transient by default; the rest are
    /// not worth repeating unchanged.
    #[must_use]
    pub const fn default_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Storage)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Api => "api",
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Cart => "cart",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Application-level error for the storefront client.
#[derive(Debug, Clone, Error)]
#[error("{kind} error: {message}")]
pub struct AppError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details (e.g., an HTTP status code).
    pub details: Option<serde_json::Value>,
    /// When the error was created.
    pub timestamp: DateTime<Utc>,
    /// Whether repeating the operation may succeed.
    pub retryable: bool,
}

impl AppError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
            retryable: kind.default_retryable(),
        }
    }

    /// A connectivity failure. Retryable by default.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// A non-success response from the remote endpoint.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// An input validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// A device-local storage failure. Retryable by default.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// A cart operation failure.
    #[must_use]
    pub fn cart(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cart, message)
    }

    /// An unclassified failure.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the kind's default `retryable` flag.
    #[must_use]
    pub const fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

/// Classify a transport failure.
///
/// Priority order: a response with an HTTP status is an API failure; then
/// connectivity shapes (connect, request) and timeouts are network failures;
/// anything else is unknown.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::api(format!("request failed with status {status}"))
                .with_details(serde_json::json!({ "status": status.as_u16() }));
        }
        if err.is_connect() || err.is_request() {
            return Self::network(err.to_string());
        }
        if err.is_timeout() {
            return Self::network("request timed out");
        }
        Self::unknown(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AppError::network("connection refused");
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = AppError::storage("disk full");
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn test_default_retryable_by_kind() {
        assert!(AppError::network("x").retryable);
        assert!(AppError::storage("x").retryable);
        assert!(!AppError::api("x").retryable);
        assert!(!AppError::validation("x").retryable);
        assert!(!AppError::cart("x").retryable);
        assert!(!AppError::unknown("x").retryable);
    }

    #[test]
    fn test_explicit_retryable_overrides_default() {
        let err = AppError::network("x").with_retryable(false);
        assert!(!err.retryable);

        let err = AppError::cart("x").with_retryable(true);
        assert!(err.retryable);
    }

    #[test]
    fn test_io_error_classifies_as_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(io);
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.retryable);
    }

    #[test]
    fn test_details_attached() {
        let err = AppError::api("bad response")
            .with_details(serde_json::json!({ "status": 502 }));
        assert_eq!(err.details, Some(serde_json::json!({ "status": 502 })));
    }
}
