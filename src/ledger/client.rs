//! Ledger service client.
//!
//! # Responsibilities
//! - Read the chain and contract state
//! - Forward transactions, mining requests, and contract calls
//! - Reject responses that do not fit the ledger's documented shapes
//!
//! The client forwards; it does not re-check business rules. A mining attempt
//! that did not forge a block is a successful call here.

use async_trait::async_trait;

use crate::config::LedgerConfig;
use crate::ledger::types::{
    Block, ChainResponse, Contract, ContractCall, DeployReceipt, DeployRequest, MineResult,
    Transaction, TransactionReceipt,
};
use crate::remote::{JsonEndpoint, RemoteResult, Service};

/// Operations the dashboard performs against the ledger service.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Read the full chain.
    async fn read_chain(&self) -> RemoteResult<Vec<Block>>;

    /// Queue a transaction for the next block.
    async fn submit_transaction(&self, transaction: &Transaction) -> RemoteResult<TransactionReceipt>;

    /// Ask the node to mine a block.
    async fn mine(&self) -> RemoteResult<MineResult>;

    /// Deploy a contract and return its address.
    async fn deploy_contract(&self, request: &DeployRequest) -> RemoteResult<DeployReceipt>;

    /// Invoke a contract method. Effects are observed through a later state read.
    async fn execute_contract(&self, address: &str, call: &ContractCall) -> RemoteResult<()>;

    /// Read the current state of a contract.
    async fn read_contract_state(&self, address: &str) -> RemoteResult<Contract>;
}

/// HTTP client for the ledger service.
#[derive(Clone, Debug)]
pub struct LedgerClient {
    endpoint: JsonEndpoint,
}

impl LedgerClient {
    /// Create a new ledger client.
    pub fn new(config: &LedgerConfig) -> RemoteResult<Self> {
        let endpoint = JsonEndpoint::new(Service::Ledger, &config.base_url, config.timeout_secs)?;
        tracing::info!(
            base_url = %endpoint.base_url(),
            timeout_secs = config.timeout_secs,
            "Ledger client initialized"
        );
        Ok(Self { endpoint })
    }

    /// The underlying endpoint.
    pub fn endpoint(&self) -> &JsonEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn read_chain(&self) -> RemoteResult<Vec<Block>> {
        let response: ChainResponse = self.endpoint.get_json("read_chain", &["chain"]).await?;
        response
            .into_blocks()
            .map_err(|reason| self.endpoint.schema_error("read_chain", reason))
    }

    async fn submit_transaction(&self, transaction: &Transaction) -> RemoteResult<TransactionReceipt> {
        self.endpoint
            .post_json("submit_transaction", &["transactions", "new"], transaction)
            .await
    }

    async fn mine(&self) -> RemoteResult<MineResult> {
        self.endpoint.get_json("mine", &["mine"]).await
    }

    async fn deploy_contract(&self, request: &DeployRequest) -> RemoteResult<DeployReceipt> {
        let receipt: DeployReceipt = self
            .endpoint
            .post_json("deploy_contract", &["contracts", "deploy"], request)
            .await?;
        if receipt.address.trim().is_empty() {
            return Err(self.endpoint.schema_error("deploy_contract", "empty contract address"));
        }
        Ok(receipt)
    }

    async fn execute_contract(&self, address: &str, call: &ContractCall) -> RemoteResult<()> {
        self.endpoint
            .post_unit("execute_contract", &["contracts", address, "execute"], call)
            .await
    }

    async fn read_contract_state(&self, address: &str) -> RemoteResult<Contract> {
        self.endpoint
            .get_json("read_contract_state", &["contracts", address, "state"])
            .await
    }
}
