// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for bookmarker
//!
//! Malformed URIs are not errors: the resolver and the fetcher report them as
//! `None`. Everything that aborts a fetch or an index operation lands here.

use thiserror::Error;

/// Result type alias for bookmarker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bookmarker
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connection refused, DNS, TLS, broken body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Input that could not be turned into a fetchable URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Redirect budget exhausted
    #[error("HTTP redirect too deep: {url} (limit {limit})")]
    TooManyRedirects { url: String, limit: u32 },

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Index lifecycle or storage error
    #[error("Index error: {0}")]
    Index(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid URI error
    pub fn invalid_uri(input: impl Into<String>) -> Self {
        Error::InvalidUri(input.into())
    }

    /// Create a too-many-redirects error
    pub fn too_many_redirects(url: impl Into<String>, limit: u32) -> Self {
        Error::TooManyRedirects {
            url: url.into(),
            limit,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create an index error
    pub fn index<S: Into<String>>(msg: S) -> Self {
        Error::Index(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Timeout { .. })
    }

    /// Check if this is recoverable (can retry)
    ///
    /// A redirect loop will loop again, so it is not.
    pub fn is_recoverable(&self) -> bool {
        self.is_transport()
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::TooManyRedirects { url, .. } => Some(url),
            Error::Timeout { url: Some(u), .. } => Some(u),
            Error::InvalidUri(input) => Some(input),
            _ => None,
        }
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_redirects() {
        let err = Error::too_many_redirects("http://example.com/loop", 5);

        assert!(!err.is_recoverable());
        assert_eq!(err.url(), Some("http://example.com/loop"));
        assert_eq!(
            err.to_string(),
            "HTTP redirect too deep: http://example.com/loop (limit 5)"
        );
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout_with_url("GET", 5000, "https://example.com");

        assert!(err.is_timeout());
        assert!(err.is_transport());
        assert!(err.is_recoverable());
        assert_eq!(err.url(), Some("https://example.com"));
    }

    #[test]
    fn test_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("opening index").unwrap_err();

        assert_eq!(err.to_string(), "opening index: I/O error: missing");
    }
}
