//! Fraud scoring service client.
//!
//! A high anomaly score is a normal answer, not an error; only transport,
//! status, and shape failures surface as `RemoteError`.

use async_trait::async_trait;

use crate::config::FraudConfig;
use crate::fraud::types::{FraudAssessment, PredictRequest, ScoringContext};
use crate::ledger::Transaction;
use crate::remote::{JsonEndpoint, RemoteResult, Service};

/// Scores candidate transactions.
#[async_trait]
pub trait FraudScorer: Send + Sync {
    async fn score(
        &self,
        transaction: &Transaction,
        context: &ScoringContext,
    ) -> RemoteResult<FraudAssessment>;
}

/// HTTP client for the fraud service.
#[derive(Clone, Debug)]
pub struct FraudClient {
    endpoint: JsonEndpoint,
}

impl FraudClient {
    /// Create a new fraud client.
    pub fn new(config: &FraudConfig) -> RemoteResult<Self> {
        let endpoint = JsonEndpoint::new(Service::Fraud, &config.base_url, config.timeout_secs)?;
        tracing::info!(
            base_url = %endpoint.base_url(),
            timeout_secs = config.timeout_secs,
            "Fraud client initialized"
        );
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &JsonEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl FraudScorer for FraudClient {
    async fn score(
        &self,
        transaction: &Transaction,
        context: &ScoringContext,
    ) -> RemoteResult<FraudAssessment> {
        let request = PredictRequest::new(transaction, context);
        let assessment: FraudAssessment = self.endpoint.post_json("score", &["predict"], &request).await?;
        if !assessment.error.is_finite() {
            return Err(self.endpoint.schema_error("score", "anomaly metric is not finite"));
        }
        Ok(assessment)
    }
}
