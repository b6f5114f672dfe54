//! Fraud scoring integration.
//!
//! The scorer is opaque: the dashboard sends a transaction value plus context
//! signals and receives a verdict.

pub mod client;
pub mod types;

pub use client::{FraudClient, FraudScorer};
pub use types::{FraudAssessment, PredictRequest, ScoringContext};
