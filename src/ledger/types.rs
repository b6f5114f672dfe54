//! Ledger wire types.
//!
//! These mirror the ledger service's JSON documents. Decoding is the schema
//! check: a body that does not fit these types becomes a `RemoteError`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Message the ledger returns when mining produced a block.
pub const FORGED_MESSAGE: &str = "The new block has been forged";

/// Amount text that is not a finite non-negative number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount '{0}' is not a finite non-negative number")]
pub struct InvalidAmount(pub String);

/// A transaction amount: the text as entered plus its parsed value.
///
/// Serialized as text. Decodes from either a JSON string or a JSON number,
/// since ledger-produced transactions (mining rewards) carry numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    text: String,
    value: f64,
}

impl Amount {
    /// Parse amount text.
    pub fn parse(text: &str) -> Result<Self, InvalidAmount> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Self {
                text: trimmed.to_string(),
                value,
            }),
            _ => Err(InvalidAmount(text.to_string())),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        Amount::parse(&text).map_err(de::Error::custom)
    }
}

/// A value transfer between two parties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

/// A block as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
}

/// Body of `GET chain`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    /// Reported chain length, when the ledger includes it.
    #[serde(default)]
    pub length: Option<usize>,
}

impl ChainResponse {
    /// Check the reported length against the blocks actually sent.
    pub fn into_blocks(self) -> Result<Vec<Block>, String> {
        match self.length {
            Some(length) if length != self.chain.len() => Err(format!(
                "reported length {} but {} blocks were sent",
                length,
                self.chain.len()
            )),
            _ => Ok(self.chain),
        }
    }
}

/// Body of `POST transactions/new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub message: String,
}

/// Body of `GET mine`, for both forged and unforged attempts.
///
/// Only `message` is required: an unsuccessful attempt may omit the block fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineResult {
    pub message: String,
    #[serde(default)]
    pub index: u64,
    #[serde(default)]
    pub previous_hash: String,
    #[serde(default)]
    pub proof: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl MineResult {
    /// Whether this attempt produced a block.
    pub fn is_forged(&self) -> bool {
        self.message == FORGED_MESSAGE
    }
}

/// Body of `POST contracts/deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub owner: String,
    /// Blank means the configured default type.
    #[serde(rename = "type", default)]
    pub contract_type: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl DeployRequest {
    /// A token contract with the given initial supply.
    pub fn token(owner: impl Into<String>, initial_supply: impl Into<Value>) -> Self {
        let mut params = Map::new();
        params.insert("initial_supply".to_string(), initial_supply.into());
        Self {
            owner: owner.into(),
            contract_type: "token".to_string(),
            params,
        }
    }
}

/// Response of `POST contracts/deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployReceipt {
    pub address: String,
}

/// Body of `POST contracts/{address}/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCall {
    pub method: String,
    pub params: Value,
}

/// A contract state snapshot from `GET contracts/{address}/state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub address: String,
    pub owner: String,
    #[serde(default)]
    pub state: Value,
}
