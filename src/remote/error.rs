//! Remote call errors.

use std::fmt;
use thiserror::Error;

/// The collaborator a remote call was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Ledger,
    Fraud,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Ledger => "ledger",
            Service::Fraud => "fraud",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to a collaborator service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The configured service location is not a usable base URL.
    #[error("Invalid {service} URL '{url}': {reason}")]
    InvalidUrl {
        service: Service,
        url: String,
        reason: String,
    },

    /// Connection or protocol failure.
    #[error("{service} {operation} failed: {reason}")]
    Transport {
        service: Service,
        operation: &'static str,
        reason: String,
    },

    /// No response within the configured deadline.
    #[error("{service} {operation} timed out after {secs} seconds")]
    Timeout {
        service: Service,
        operation: &'static str,
        secs: u64,
    },

    /// The service answered with a non-success status.
    #[error("{service} {operation} returned status {status}: {body}")]
    Status {
        service: Service,
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("{service} {operation} sent a malformed response: {reason}")]
    Schema {
        service: Service,
        operation: &'static str,
        reason: String,
    },
}

impl RemoteError {
    /// The collaborator this error came from.
    pub fn service(&self) -> Service {
        match self {
            RemoteError::InvalidUrl { service, .. }
            | RemoteError::Transport { service, .. }
            | RemoteError::Timeout { service, .. }
            | RemoteError::Status { service, .. }
            | RemoteError::Schema { service, .. } => *service,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::InvalidUrl { .. } => "invalid_url",
            RemoteError::Transport { .. } => "transport",
            RemoteError::Timeout { .. } => "timeout",
            RemoteError::Status { .. } => "status",
            RemoteError::Schema { .. } => "schema",
        }
    }
}

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;
