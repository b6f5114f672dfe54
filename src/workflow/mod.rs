//! Dashboard workflows.
//!
//! # Data Flow
//! ```text
//! operator intent
//!     → input.rs (validate before any remote call)
//!     → guard.rs (in-flight flags)
//!     → orchestrator.rs (remote calls in order, state events)
//!     → outcome.rs (typed result) / error.rs (typed failure)
//! ```
//!
//! # Design Decisions
//! - Fraud scoring strictly precedes submission; an anomaly ends the run
//! - One transaction submission at a time; overlaps get `Busy`
//! - Failures land in `last_error` and are returned to the caller

pub mod error;
mod guard;
pub mod input;
pub mod orchestrator;
pub mod outcome;

pub use error::{ValidationError, WorkflowError, WorkflowResult};
pub use orchestrator::{WorkflowOrchestrator, WorkflowSettings};
pub use outcome::{MineOutcome, TransactionOutcome, Workflow};
