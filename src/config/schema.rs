//! Configuration schema definitions.
//!
//! Every section is optional in the file; missing fields take the defaults
//! below, which match a ledger node on port 5000 and a fraud scorer on 8000.

use serde::{Deserialize, Serialize};

use crate::fraud::ScoringContext;

/// Root configuration for the dashboard service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dashboard API listener.
    pub listener: ListenerConfig,

    /// Ledger service location.
    pub ledger: LedgerConfig,

    /// Fraud service location and scoring context.
    pub fraud: FraudConfig,

    /// Contract workflow behavior.
    pub contracts: ContractsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Upper bound on one API request, including the remote calls it triggers.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Ledger service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Base URL of the ledger node.
    pub base_url: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Fraud service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Base URL of the fraud scorer.
    pub base_url: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,

    /// Context signals sent with every scoring request.
    pub context: ScoringContext,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            context: ScoringContext::default(),
        }
    }
}

/// How a contract state read is recorded in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotPolicy {
    /// Every read adds a new entry, keeping a history per address.
    #[default]
    Append,
    /// A read replaces the entry for the same address, or adds one.
    Upsert,
}

/// Contract workflow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Append or upsert state snapshots.
    pub snapshot_policy: SnapshotPolicy,

    /// Contract type used when a deploy request leaves it blank.
    pub default_type: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            snapshot_policy: SnapshotPolicy::Append,
            default_type: "token".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
