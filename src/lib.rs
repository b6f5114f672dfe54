//! Ledger dashboard library.
//!
//! Orchestrates operator workflows against a remote ledger node and a remote
//! fraud-scoring service, and keeps an observable dashboard state.

// Collaborators
pub mod fraud;
pub mod ledger;
pub mod remote;

// Core
pub mod state;
pub mod workflow;

// Service surface
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::DashboardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use workflow::WorkflowOrchestrator;
