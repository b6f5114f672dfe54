//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! remote endpoints and workflows produce:
//!     → logging.rs (structured events, one span per workflow run)
//!     → metrics.rs (call and workflow counters, latency histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
