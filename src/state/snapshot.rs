//! The dashboard state snapshot and its reducer.

use serde::{Deserialize, Serialize};

use crate::config::SnapshotPolicy;
use crate::fraud::FraudAssessment;
use crate::ledger::{Block, Contract, MineResult};
use crate::state::event::StateEvent;

/// Raw transaction form input, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionDraft {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
}

impl TransactionDraft {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// True when every field is blank.
    pub fn is_empty(&self) -> bool {
        self.sender.is_empty() && self.recipient.is_empty() && self.amount.is_empty()
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    /// Incremented on every applied event.
    pub version: u64,
    /// Latest successful chain read, replaced wholesale.
    pub chain: Vec<Block>,
    pub pending_transaction: TransactionDraft,
    pub last_fraud_assessment: Option<FraudAssessment>,
    pub last_transaction_message: Option<String>,
    /// Contract state snapshots in the order they were read.
    pub contracts: Vec<Contract>,
    /// Selected contract address; set by deployment or by the operator.
    pub contract_address: Option<String>,
    pub last_mine_result: Option<MineResult>,
    pub is_submitting: bool,
    /// Number of mining workflows currently running.
    pub mining_in_flight: u32,
    pub last_error: Option<String>,
}

impl DashboardState {
    pub fn is_mining(&self) -> bool {
        self.mining_in_flight > 0
    }

    /// Apply one workflow event.
    pub fn apply(&mut self, event: &StateEvent, policy: SnapshotPolicy) {
        match event {
            StateEvent::ChainRefreshed(chain) => {
                self.chain = chain.clone();
            }
            StateEvent::PendingEdited(draft) => {
                self.pending_transaction = draft.clone();
            }
            StateEvent::SubmissionStarted => {
                self.is_submitting = true;
            }
            StateEvent::SubmissionFinished => {
                self.is_submitting = false;
            }
            StateEvent::FraudAssessed(assessment) => {
                // A new attempt: the previous attempt's ledger message no longer applies.
                self.last_fraud_assessment = Some(assessment.clone());
                self.last_transaction_message = None;
            }
            StateEvent::TransactionCommitted { message, submitted } => {
                self.last_transaction_message = Some(message.clone());
                // An edit made while the run was in flight is kept.
                if self.pending_transaction == *submitted {
                    self.pending_transaction = TransactionDraft::default();
                }
            }
            StateEvent::MiningStarted => {
                self.mining_in_flight += 1;
            }
            StateEvent::MiningFinished => {
                self.mining_in_flight = self.mining_in_flight.saturating_sub(1);
            }
            StateEvent::MineRecorded(result) => {
                self.last_mine_result = Some(result.clone());
            }
            StateEvent::ContractSelected(address) => {
                self.contract_address = address.clone();
            }
            StateEvent::ContractSnapshot(contract) => match policy {
                SnapshotPolicy::Append => self.contracts.push(contract.clone()),
                SnapshotPolicy::Upsert => {
                    match self.contracts.iter_mut().find(|c| c.address == contract.address) {
                        Some(existing) => *existing = contract.clone(),
                        None => self.contracts.push(contract.clone()),
                    }
                }
            },
            StateEvent::Failed(message) => {
                self.last_error = Some(message.clone());
            }
            StateEvent::ErrorDismissed => {
                self.last_error = None;
            }
        }
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contract(address: &str, supply: u64) -> Contract {
        Contract {
            address: address.to_string(),
            owner: "alice".to_string(),
            state: json!({ "total_supply": supply }),
        }
    }

    fn block(index: u64) -> Block {
        Block {
            index,
            previous_hash: format!("hash-{}", index),
            transactions: Vec::new(),
            proof: 100 + index,
        }
    }

    #[test]
    fn test_chain_is_replaced_not_merged() {
        let mut state = DashboardState::default();
        state.apply(&StateEvent::ChainRefreshed(vec![block(1), block(2)]), SnapshotPolicy::Append);
        state.apply(&StateEvent::ChainRefreshed(vec![block(1)]), SnapshotPolicy::Append);
        assert_eq!(state.chain, vec![block(1)]);
        assert_eq!(state.version, 2);
    }

    #[test]
    fn test_append_keeps_history() {
        let mut state = DashboardState::default();
        state.apply(&StateEvent::ContractSnapshot(contract("0xa", 1)), SnapshotPolicy::Append);
        state.apply(&StateEvent::ContractSnapshot(contract("0xa", 2)), SnapshotPolicy::Append);
        assert_eq!(state.contracts.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_by_address() {
        let mut state = DashboardState::default();
        state.apply(&StateEvent::ContractSnapshot(contract("0xa", 1)), SnapshotPolicy::Upsert);
        state.apply(&StateEvent::ContractSnapshot(contract("0xb", 5)), SnapshotPolicy::Upsert);
        state.apply(&StateEvent::ContractSnapshot(contract("0xa", 2)), SnapshotPolicy::Upsert);
        assert_eq!(state.contracts, vec![contract("0xa", 2), contract("0xb", 5)]);
    }

    #[test]
    fn test_commit_clears_pending() {
        let mut state = DashboardState::default();
        state.apply(
            &StateEvent::PendingEdited(TransactionDraft::new("alice", "bob", "10")),
            SnapshotPolicy::Append,
        );
        state.apply(
            &StateEvent::TransactionCommitted {
                message: "queued".into(),
                submitted: TransactionDraft::new("alice", "bob", "10"),
            },
            SnapshotPolicy::Append,
        );
        assert!(state.pending_transaction.is_empty());
        assert_eq!(state.last_transaction_message.as_deref(), Some("queued"));
    }

    #[test]
    fn test_commit_keeps_newer_pending_edit() {
        let mut state = DashboardState::default();
        state.apply(
            &StateEvent::PendingEdited(TransactionDraft::new("carol", "dave", "999")),
            SnapshotPolicy::Append,
        );
        state.apply(
            &StateEvent::TransactionCommitted {
                message: "queued".into(),
                submitted: TransactionDraft::new("alice", "bob", "1"),
            },
            SnapshotPolicy::Append,
        );
        assert_eq!(state.pending_transaction, TransactionDraft::new("carol", "dave", "999"));
        assert_eq!(state.last_transaction_message.as_deref(), Some("queued"));
    }

    #[test]
    fn test_new_assessment_clears_previous_message() {
        let mut state = DashboardState::default();
        state.apply(
            &StateEvent::TransactionCommitted {
                message: "queued".into(),
                submitted: TransactionDraft::default(),
            },
            SnapshotPolicy::Append,
        );
        state.apply(
            &StateEvent::FraudAssessed(FraudAssessment { anomaly: true, error: 0.9 }),
            SnapshotPolicy::Append,
        );
        assert!(state.last_transaction_message.is_none());
    }

    #[test]
    fn test_mining_counter_never_underflows() {
        let mut state = DashboardState::default();
        state.apply(&StateEvent::MiningStarted, SnapshotPolicy::Append);
        assert!(state.is_mining());
        state.apply(&StateEvent::MiningFinished, SnapshotPolicy::Append);
        state.apply(&StateEvent::MiningFinished, SnapshotPolicy::Append);
        assert_eq!(state.mining_in_flight, 0);
    }
}
