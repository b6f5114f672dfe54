//! Workflow orchestrator.
//!
//! # Transaction workflow
//! ```text
//! Idle → Validating → Scoring → Gated                    → Idle
//!                             → Submitting → Committed   → Idle
//!                                          → Failed      → Idle
//! ```
//! The score call always completes before a submission is issued. Only one
//! submission runs at a time per orchestrator; overlapping calls get `Busy`.
//!
//! # Mining workflow
//! `Idle → Mining → Done`. The result is recorded verbatim, forged or not,
//! and the chain is reloaded.
//!
//! # Contract workflows
//! Deploy selects the returned address. Execute runs the method and then
//! reads the same contract's state as one step. Read state requires a
//! selected address.
//!
//! Every failure except `Busy` is written to `last_error` and returned to the
//! caller.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{DashboardConfig, SnapshotPolicy};
use crate::fraud::{FraudClient, FraudScorer, ScoringContext};
use crate::ledger::{Contract, DeployRequest, LedgerApi, LedgerClient};
use crate::observability::metrics;
use crate::remote::RemoteResult;
use crate::state::{DashboardState, StateEvent, StateStore, StateView, TransactionDraft};
use crate::workflow::error::{ValidationError, WorkflowError, WorkflowResult};
use crate::workflow::guard::{MiningGuard, SubmissionGuard};
use crate::workflow::input::{required, validate_call, validate_transaction};
use crate::workflow::outcome::{MineOutcome, TransactionOutcome, Workflow};

/// Orchestrator settings derived from configuration.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// Context sent with every fraud score request.
    pub scoring_context: ScoringContext,
    pub snapshot_policy: SnapshotPolicy,
    /// Used when a deploy request has no contract type.
    pub default_contract_type: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for WorkflowSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            scoring_context: config.fraud.context.clone(),
            snapshot_policy: config.contracts.snapshot_policy,
            default_contract_type: config.contracts.default_type.clone(),
        }
    }
}

/// Runs dashboard workflows against the ledger and fraud services and owns
/// the resulting state.
pub struct WorkflowOrchestrator {
    ledger: Arc<dyn LedgerApi>,
    fraud: Arc<dyn FraudScorer>,
    store: Arc<StateStore>,
    settings: WorkflowSettings,
    submitting: AtomicBool,
}

impl WorkflowOrchestrator {
    pub fn new(
        ledger: Arc<dyn LedgerApi>,
        fraud: Arc<dyn FraudScorer>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            ledger,
            fraud,
            store: Arc::new(StateStore::new(settings.snapshot_policy)),
            settings,
            submitting: AtomicBool::new(false),
        }
    }

    /// Build the HTTP clients from configuration and wire them up.
    pub fn from_config(config: &DashboardConfig) -> RemoteResult<Self> {
        let ledger = LedgerClient::new(&config.ledger)?;
        let fraud = FraudClient::new(&config.fraud)?;
        Ok(Self::new(Arc::new(ledger), Arc::new(fraud), WorkflowSettings::from(config)))
    }

    /// Read-only handle for observers.
    pub fn view(&self) -> StateView {
        StateView::new(Arc::clone(&self.store))
    }

    /// The current state snapshot.
    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.store.snapshot()
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Replace the pending transaction form fields.
    pub fn edit_pending_transaction(&self, draft: TransactionDraft) {
        self.store.apply(StateEvent::PendingEdited(draft));
    }

    /// Select the contract that execute and read-state act on. Blank clears it.
    pub fn select_contract(&self, address: &str) {
        let address = address.trim();
        let selected = (!address.is_empty()).then(|| address.to_string());
        self.store.apply(StateEvent::ContractSelected(selected));
    }

    pub fn dismiss_error(&self) {
        self.store.apply(StateEvent::ErrorDismissed);
    }

    /// Reload the chain view. Returns the number of blocks.
    pub async fn refresh_chain(&self) -> WorkflowResult<usize> {
        self.reload_chain()
            .instrument(workflow_span(Workflow::ChainRefresh))
            .await
    }

    /// Run the fraud-gated transaction workflow on the pending transaction.
    pub async fn submit_transaction(&self) -> WorkflowResult<TransactionOutcome> {
        self.run_transaction(None)
            .instrument(workflow_span(Workflow::Transaction))
            .await
    }

    /// Replace the pending transaction with `draft` and submit it.
    ///
    /// The draft is only applied once the submission slot is held, so a
    /// `Busy` rejection leaves the pending transaction untouched.
    pub async fn submit(&self, draft: TransactionDraft) -> WorkflowResult<TransactionOutcome> {
        self.run_transaction(Some(draft))
            .instrument(workflow_span(Workflow::Transaction))
            .await
    }

    /// Ask the ledger to mine a block.
    pub async fn mine(&self) -> WorkflowResult<MineOutcome> {
        self.run_mining().instrument(workflow_span(Workflow::Mining)).await
    }

    /// Deploy a contract and select its address. Returns the address.
    pub async fn deploy_contract(&self, request: DeployRequest) -> WorkflowResult<String> {
        self.run_deploy(request)
            .instrument(workflow_span(Workflow::Deploy))
            .await
    }

    /// Execute a method on the selected contract, then record its new state.
    ///
    /// `params` is the method parameters as JSON text.
    pub async fn execute_contract(&self, method: &str, params: &str) -> WorkflowResult<Contract> {
        self.run_execute(method, params)
            .instrument(workflow_span(Workflow::Execute))
            .await
    }

    /// Read and record the selected contract's state.
    pub async fn read_contract_state(&self) -> WorkflowResult<Contract> {
        self.run_read_state()
            .instrument(workflow_span(Workflow::ContractState))
            .await
    }

    async fn run_transaction(
        &self,
        replacement: Option<TransactionDraft>,
    ) -> WorkflowResult<TransactionOutcome> {
        let Some(_guard) = SubmissionGuard::acquire(&self.submitting, &self.store) else {
            tracing::warn!("Transaction submission already in progress, rejecting");
            metrics::record_workflow(Workflow::Transaction.as_str(), "busy");
            return Err(WorkflowError::Busy);
        };

        if let Some(draft) = replacement {
            self.store.apply(StateEvent::PendingEdited(draft));
        }
        let draft = self.store.snapshot().pending_transaction.clone();
        let transaction = validate_transaction(&draft)
            .map_err(|e| self.fail(Workflow::Transaction, e.into()))?;

        tracing::debug!(
            sender = %transaction.sender,
            recipient = %transaction.recipient,
            amount = %transaction.amount,
            "Scoring transaction"
        );
        let assessment = self
            .fraud
            .score(&transaction, &self.settings.scoring_context)
            .await
            .map_err(|e| self.fail(Workflow::Transaction, e.into()))?;
        self.store.apply(StateEvent::FraudAssessed(assessment.clone()));

        if assessment.anomaly {
            tracing::info!(error = assessment.error, "Transaction flagged as anomalous, not submitted");
            metrics::record_workflow(Workflow::Transaction.as_str(), "gated");
            return Ok(TransactionOutcome::Gated { assessment });
        }

        let receipt = self
            .ledger
            .submit_transaction(&transaction)
            .await
            .map_err(|e| self.fail(Workflow::Transaction, e.into()))?;
        tracing::info!(message = %receipt.message, error = assessment.error, "Transaction submitted");
        self.store.apply(StateEvent::TransactionCommitted {
            message: receipt.message.clone(),
            submitted: draft,
        });
        metrics::record_workflow(Workflow::Transaction.as_str(), "committed");

        if let Err(e) = self.reload_chain().await {
            tracing::debug!(error = %e, "Chain reload after commit failed, outcome unchanged");
        }

        Ok(TransactionOutcome::Committed {
            message: receipt.message,
            assessment,
        })
    }

    async fn run_mining(&self) -> WorkflowResult<MineOutcome> {
        let _guard = MiningGuard::enter(&self.store);

        let result = self
            .ledger
            .mine()
            .await
            .map_err(|e| self.fail(Workflow::Mining, e.into()))?;
        self.store.apply(StateEvent::MineRecorded(result.clone()));

        let outcome = if result.is_forged() {
            tracing::info!(index = result.index, proof = result.proof, "Block forged");
            metrics::record_workflow(Workflow::Mining.as_str(), "forged");
            MineOutcome::Forged { result }
        } else {
            tracing::warn!(message = %result.message, "Mining did not forge a block");
            metrics::record_workflow(Workflow::Mining.as_str(), "not_forged");
            MineOutcome::NotForged { result }
        };

        if let Err(e) = self.reload_chain().await {
            tracing::debug!(error = %e, "Chain reload after mining failed, outcome unchanged");
        }
        Ok(outcome)
    }

    async fn run_deploy(&self, mut request: DeployRequest) -> WorkflowResult<String> {
        request.owner =
            required("owner", &request.owner).map_err(|e| self.fail(Workflow::Deploy, e.into()))?;
        if request.contract_type.trim().is_empty() {
            request.contract_type = self.settings.default_contract_type.clone();
        }

        let receipt = self
            .ledger
            .deploy_contract(&request)
            .await
            .map_err(|e| self.fail(Workflow::Deploy, e.into()))?;
        tracing::info!(
            address = %receipt.address,
            owner = %request.owner,
            contract_type = %request.contract_type,
            "Contract deployed"
        );
        self.store.apply(StateEvent::ContractSelected(Some(receipt.address.clone())));
        metrics::record_workflow(Workflow::Deploy.as_str(), "ok");
        Ok(receipt.address)
    }

    async fn run_execute(&self, method: &str, params: &str) -> WorkflowResult<Contract> {
        let prepared = self
            .selected_address()
            .and_then(|address| Ok((address, validate_call(method, params)?)));
        let (address, call) = prepared.map_err(|e| self.fail(Workflow::Execute, e.into()))?;

        self.ledger
            .execute_contract(&address, &call)
            .await
            .map_err(|e| self.fail(Workflow::Execute, e.into()))?;
        tracing::info!(%address, method = %call.method, "Contract method executed");

        // Same address and failure boundary as the execute call.
        let contract = self
            .ledger
            .read_contract_state(&address)
            .await
            .map_err(|e| self.fail(Workflow::Execute, e.into()))?;
        self.store.apply(StateEvent::ContractSnapshot(contract.clone()));
        metrics::record_workflow(Workflow::Execute.as_str(), "ok");
        Ok(contract)
    }

    async fn run_read_state(&self) -> WorkflowResult<Contract> {
        let address = self
            .selected_address()
            .map_err(|e| self.fail(Workflow::ContractState, e.into()))?;

        let contract = self
            .ledger
            .read_contract_state(&address)
            .await
            .map_err(|e| self.fail(Workflow::ContractState, e.into()))?;
        self.store.apply(StateEvent::ContractSnapshot(contract.clone()));
        metrics::record_workflow(Workflow::ContractState.as_str(), "ok");
        Ok(contract)
    }

    async fn reload_chain(&self) -> WorkflowResult<usize> {
        let chain = self
            .ledger
            .read_chain()
            .await
            .map_err(|e| self.fail(Workflow::ChainRefresh, e.into()))?;
        let blocks = chain.len();
        tracing::debug!(blocks, "Chain view refreshed");
        self.store.apply(StateEvent::ChainRefreshed(chain));
        metrics::record_workflow(Workflow::ChainRefresh.as_str(), "ok");
        Ok(blocks)
    }

    fn selected_address(&self) -> Result<String, ValidationError> {
        self.store
            .snapshot()
            .contract_address
            .clone()
            .ok_or(ValidationError::NoContractSelected)
    }

    /// Record a failure in state and hand the error back.
    fn fail(&self, workflow: Workflow, error: WorkflowError) -> WorkflowError {
        tracing::warn!(workflow = workflow.as_str(), kind = error.kind(), error = %error, "Workflow failed");
        metrics::record_workflow(workflow.as_str(), error.kind());
        self.store.apply(StateEvent::Failed(format!(
            "{}: {}",
            workflow.failure_message(),
            error
        )));
        error
    }
}

impl std::fmt::Debug for WorkflowOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("version", &self.store.snapshot().version)
            .field("settings", &self.settings)
            .finish()
    }
}

fn workflow_span(workflow: Workflow) -> tracing::Span {
    tracing::info_span!("workflow", name = workflow.as_str(), run_id = %Uuid::new_v4())
}
