//! Remote collaborator plumbing shared by the ledger and fraud clients.
//!
//! # Data Flow
//! ```text
//! ledger::LedgerClient / fraud::FraudClient
//!     → endpoint.rs (build URL, send with deadline, check status)
//!     → endpoint.rs (decode body against the response type)
//!     → error.rs (RemoteError on transport, status, or shape failure)
//! ```
//!
//! # Design Decisions
//! - Every call has a deadline; a timeout is reported distinctly
//! - Response bodies are decoded into concrete types, never passed on as raw JSON
//! - No retries at this layer; a retry is a new user-initiated workflow

pub mod endpoint;
pub mod error;

pub use endpoint::JsonEndpoint;
pub use error::{RemoteError, RemoteResult, Service};
