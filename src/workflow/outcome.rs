//! Workflow names and successful outcomes.

use serde::Serialize;

use crate::fraud::FraudAssessment;
use crate::ledger::MineResult;

/// The workflows the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    ChainRefresh,
    Transaction,
    Mining,
    Deploy,
    Execute,
    ContractState,
}

impl Workflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::ChainRefresh => "chain_refresh",
            Workflow::Transaction => "transaction",
            Workflow::Mining => "mining",
            Workflow::Deploy => "deploy",
            Workflow::Execute => "execute",
            Workflow::ContractState => "contract_state",
        }
    }

    /// Prefix of the `last_error` message when this workflow fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Workflow::ChainRefresh => "Failed to fetch blockchain data",
            Workflow::Transaction => "Transaction failed",
            Workflow::Mining => "Mining failed",
            Workflow::Deploy => "Contract deployment failed",
            Workflow::Execute => "Contract execution failed",
            Workflow::ContractState => "Failed to fetch contract state",
        }
    }
}

/// How a transaction workflow ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransactionOutcome {
    /// Scored clean and accepted by the ledger.
    Committed {
        message: String,
        assessment: FraudAssessment,
    },
    /// Flagged by the scorer; nothing was sent to the ledger.
    Gated { assessment: FraudAssessment },
}

impl TransactionOutcome {
    pub fn assessment(&self) -> &FraudAssessment {
        match self {
            TransactionOutcome::Committed { assessment, .. }
            | TransactionOutcome::Gated { assessment } => assessment,
        }
    }
}

/// How a mining workflow ended when the ledger answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MineOutcome {
    Forged { result: MineResult },
    /// The ledger answered but did not forge a block. Not retried.
    NotForged { result: MineResult },
}

impl MineOutcome {
    pub fn result(&self) -> &MineResult {
        match self {
            MineOutcome::Forged { result } | MineOutcome::NotForged { result } => result,
        }
    }

    pub fn is_forged(&self) -> bool {
        matches!(self, MineOutcome::Forged { .. })
    }
}
