//! Client-visible dashboard state.
//!
//! # Data Flow
//! ```text
//! workflow completion
//!     → event.rs (StateEvent)
//!     → store.rs (clone current snapshot, apply, atomic swap)
//!     → snapshot.rs (DashboardState reducer)
//!     → StateView readers + change notifications
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; readers never see a half-applied event
//! - Mutation is crate-private and goes through the orchestrator
//! - The contract snapshot policy is fixed per store

pub mod event;
pub mod snapshot;
pub mod store;

pub use event::StateEvent;
pub use snapshot::{DashboardState, TransactionDraft};
pub use store::{StateChange, StateStore, StateView};
