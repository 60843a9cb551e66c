//! Error types module
//!
//! All failures of the upload workflow are unified under `ClientError`. No
//! variant is fatal: every failure path returns the workflow to `Idle` so the
//! user can retry by submitting again.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a corrupt ledger
    Warn,
    /// Error level - for failed network exchanges
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Bad or missing file. Shown inline, never as a notification.
    #[error("{0}")]
    Validation(String),

    /// Upload or artifact retrieval failed (network failure or non-2xx).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Duplex channel failed, or the backend reported an error or unknown status.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Persisted ledger could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this error is shown to the user as a notification.
    pub fn is_notified(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Channel(_))
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            ClientError::Validation(_) => LogLevel::Debug,
            ClientError::Storage(_) | ClientError::Config(_) => LogLevel::Warn,
            ClientError::Transport(_) | ClientError::Channel(_) => LogLevel::Error,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Channel(_) => "CHANNEL_ERROR",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Storage(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Storage(format!("JSON error: {}", err))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_failures_are_notified() {
        assert!(ClientError::Transport("boom".into()).is_notified());
        assert!(ClientError::Channel("closed".into()).is_notified());
        assert!(!ClientError::Validation("A pdf-file is required".into()).is_notified());
        assert!(!ClientError::Storage("corrupt".into()).is_notified());
        assert!(!ClientError::Config("bad host".into()).is_notified());
    }

    #[test]
    fn test_validation_message_is_displayed_verbatim() {
        let err = ClientError::Validation("Only PDF files are allowed".into());
        assert_eq!(err.to_string(), "Only PDF files are allowed");
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: ClientError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, ClientError::Storage(_)));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }
}
