//! Error types for the metascan library.
//!
//! Every failure is returned as a `ScanError`. The variants split into two
//! families: fatal setup errors (configuration, usage, missing file) that
//! abort an invocation, and transport errors raised by the remote API that
//! the workflow boundary reports and absorbs.

use thiserror::Error;

/// The main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The key file or client configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// The command line was not used correctly.
    #[error("usage error: {message}")]
    Usage {
        /// Description of the misuse.
        message: String,
    },

    /// File not found at the specified path.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// An I/O error occurred while reading the target file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with a failure status or an unrecognised error code.
    #[error("request to {endpoint} failed with status {status}: {message}")]
    HttpStatus {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code returned.
        status: u16,
        /// Error message extracted from the body, or the status reason.
        message: String,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("connection to {endpoint} failed: {message}")]
    ConnectionFailed {
        /// Endpoint path that was called.
        endpoint: String,
        /// Error message describing the failure.
        message: String,
    },

    /// The API returned a body that is not the expected JSON shape.
    #[error("malformed response from {endpoint}: {details}")]
    MalformedResponse {
        /// Endpoint path that was called.
        endpoint: String,
        /// Details about what was wrong.
        details: String,
    },

    /// A configured poll bound was reached before the scan completed.
    #[error("scan {data_id} still incomplete after {attempts} polls")]
    PollLimitExceeded {
        /// Tracking identifier being polled.
        data_id: String,
        /// Number of poll requests issued.
        attempts: u32,
    },
}

impl ScanError {
    /// Returns `true` for errors raised by the HTTP layer.
    ///
    /// These are the only errors the workflow catches; everything else
    /// aborts the invocation.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. }
                | Self::ConnectionFailed { .. }
                | Self::MalformedResponse { .. }
                | Self::PollLimitExceeded { .. }
        )
    }

    /// Returns the endpoint if this error is associated with one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { endpoint, .. }
            | Self::ConnectionFailed { endpoint, .. }
            | Self::MalformedResponse { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a `Usage` error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Creates an `HttpStatus` error.
    pub fn http_status(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a `ConnectionFailed` error.
    pub fn connection_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a `MalformedResponse` error.
    pub fn malformed(endpoint: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            details: details.into(),
        }
    }
}

/// A specialized `Result` type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ScanError::http_status("/file", 500, "boom").is_transport());
        assert!(ScanError::connection_failed("/hash/abc", "refused").is_transport());
        assert!(ScanError::malformed("/file", "missing data_id").is_transport());
        assert!(ScanError::PollLimitExceeded {
            data_id: "id".into(),
            attempts: 3,
        }
        .is_transport());

        assert!(!ScanError::configuration("no key").is_transport());
        assert!(!ScanError::usage("one path").is_transport());
        assert!(!ScanError::FileNotFound { path: "x".into() }.is_transport());
        assert!(!ScanError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).is_transport());
    }

    #[test]
    fn test_endpoint_and_status() {
        let err = ScanError::http_status("/file", 401, "Invalid apikey");
        assert_eq!(err.endpoint(), Some("/file"));
        assert_eq!(err.status(), Some(401));

        let err = ScanError::configuration("missing");
        assert_eq!(err.endpoint(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_display() {
        let err = ScanError::http_status("/file", 503, "Service Unavailable");
        let text = err.to_string();
        assert!(text.contains("/file"));
        assert!(text.contains("503"));
        assert!(text.contains("Service Unavailable"));
    }
}
