//! Ledger service integration.
//!
//! # Data Flow
//! ```text
//! Orchestrator
//!     → client.rs (LedgerApi: chain, transactions, mining, contracts)
//!     → remote::JsonEndpoint (HTTP with deadlines)
//!     → types.rs (decode and check response shapes)
//! ```

pub mod client;
pub mod types;

pub use client::{LedgerApi, LedgerClient};
pub use types::{
    Amount, Block, Contract, ContractCall, DeployReceipt, DeployRequest, InvalidAmount,
    MineResult, Transaction, TransactionReceipt, FORGED_MESSAGE,
};
