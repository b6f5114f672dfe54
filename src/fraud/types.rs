//! Fraud scoring wire types.

use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

/// The scorer's verdict on one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Whether the transaction looks anomalous.
    pub anomaly: bool,
    /// Continuous anomaly metric (reconstruction error).
    pub error: f64,
}

/// Caller-supplied signals sent alongside the transaction value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringContext {
    /// Number of recent transactions from the sender.
    pub frequency: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the sender's usual location.
    pub location_deviation: f64,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self {
            frequency: 1,
            // Singapore
            latitude: 1.3521,
            longitude: 103.8198,
            location_deviation: 0.0,
        }
    }
}

/// Body of `POST predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub transaction_value: f64,
    pub frequency: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub location_deviation: f64,
}

impl PredictRequest {
    pub fn new(transaction: &Transaction, context: &ScoringContext) -> Self {
        Self {
            transaction_value: transaction.amount.value(),
            frequency: context.frequency,
            latitude: context.latitude,
            longitude: context.longitude,
            location_deviation: context.location_deviation,
        }
    }
}
