//! Dashboard JSON API.
//!
//! # Data Flow
//! ```text
//! browser / dashboard-cli
//!     → server.rs (router, request id, trace, timeout, CORS)
//!     → handlers.rs (decode body, call the orchestrator)
//!     → response.rs (outcome JSON or error status)
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
