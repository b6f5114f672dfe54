//! Workflow completion events: the only way the dashboard state changes.

use crate::fraud::FraudAssessment;
use crate::ledger::{Block, Contract, MineResult};
use crate::state::snapshot::TransactionDraft;

#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    ChainRefreshed(Vec<Block>),
    PendingEdited(TransactionDraft),
    SubmissionStarted,
    SubmissionFinished,
    FraudAssessed(FraudAssessment),
    /// The ledger accepted `submitted`, the draft the run started from.
    TransactionCommitted {
        message: String,
        submitted: TransactionDraft,
    },
    MiningStarted,
    MiningFinished,
    MineRecorded(MineResult),
    ContractSelected(Option<String>),
    ContractSnapshot(Contract),
    /// Human-readable failure message for `last_error`.
    Failed(String),
    ErrorDismissed,
}

impl StateEvent {
    /// Stable name for change notifications and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StateEvent::ChainRefreshed(_) => "chain_refreshed",
            StateEvent::PendingEdited(_) => "pending_edited",
            StateEvent::SubmissionStarted => "submission_started",
            StateEvent::SubmissionFinished => "submission_finished",
            StateEvent::FraudAssessed(_) => "fraud_assessed",
            StateEvent::TransactionCommitted { .. } => "transaction_committed",
            StateEvent::MiningStarted => "mining_started",
            StateEvent::MiningFinished => "mining_finished",
            StateEvent::MineRecorded(_) => "mine_recorded",
            StateEvent::ContractSelected(_) => "contract_selected",
            StateEvent::ContractSnapshot(_) => "contract_snapshot",
            StateEvent::Failed(_) => "failed",
            StateEvent::ErrorDismissed => "error_dismissed",
        }
    }
}
