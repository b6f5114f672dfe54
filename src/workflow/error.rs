//! Workflow error taxonomy.

use thiserror::Error;

use crate::ledger::InvalidAmount;
use crate::remote::RemoteError;

/// Malformed operator input, caught before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error(transparent)]
    Amount(#[from] InvalidAmount),

    #[error("method parameters are not valid JSON: {0}")]
    InvalidParams(String),

    #[error("no contract address selected")]
    NoContractSelected,
}

/// Why a workflow run did not complete.
///
/// Negative outcomes reported inside a successful response (an unforged
/// block, a gated transaction) are outcomes, not errors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Another transaction submission from this orchestrator is in flight.
    #[error("a transaction submission is already in progress")]
    Busy,
}

impl WorkflowError {
    /// Short label used for metrics and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) => "validation",
            WorkflowError::Remote(_) => "remote",
            WorkflowError::Busy => "busy",
        }
    }
}

/// Result type for workflow runs.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
