//! Operator input validation.
//!
//! Every check here runs before the first remote call of its workflow.

use serde_json::Value;

use crate::ledger::{Amount, ContractCall, Transaction};
use crate::state::TransactionDraft;
use crate::workflow::error::ValidationError;

/// Turn a transaction draft into a transaction the scorer and ledger accept.
pub fn validate_transaction(draft: &TransactionDraft) -> Result<Transaction, ValidationError> {
    let sender = required("sender", &draft.sender)?;
    let recipient = required("recipient", &draft.recipient)?;
    required("amount", &draft.amount)?;
    let amount = Amount::parse(&draft.amount)?;

    Ok(Transaction {
        sender,
        recipient,
        amount,
    })
}

/// Build a contract call from a method name and its parameters as JSON text.
pub fn validate_call(method: &str, params: &str) -> Result<ContractCall, ValidationError> {
    let method = required("method", method)?;
    let params: Value =
        serde_json::from_str(params).map_err(|e| ValidationError::InvalidParams(e.to_string()))?;
    Ok(ContractCall { method, params })
}

/// A trimmed, non-empty value.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_transaction() {
        let tx = validate_transaction(&TransactionDraft::new(" alice ", "bob", "10")).unwrap();
        assert_eq!(tx.sender, "alice");
        assert_eq!(tx.amount.value(), 10.0);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_transaction(&TransactionDraft::new("", "bob", "10")),
            Err(ValidationError::Missing("sender"))
        );
        assert_eq!(
            validate_transaction(&TransactionDraft::new("alice", "  ", "10")),
            Err(ValidationError::Missing("recipient"))
        );
        assert_eq!(
            validate_transaction(&TransactionDraft::new("alice", "bob", "")),
            Err(ValidationError::Missing("amount"))
        );
    }

    #[test]
    fn test_unparseable_amount() {
        assert!(matches!(
            validate_transaction(&TransactionDraft::new("alice", "bob", "ten")),
            Err(ValidationError::Amount(_))
        ));
    }

    #[test]
    fn test_contract_call() {
        let call = validate_call("transfer", r#"{"to": "bob", "amount": 5}"#).unwrap();
        assert_eq!(call.params, json!({"to": "bob", "amount": 5}));

        assert_eq!(validate_call("", "{}"), Err(ValidationError::Missing("method")));
        assert!(matches!(
            validate_call("transfer", "{not json"),
            Err(ValidationError::InvalidParams(_))
        ));
        assert!(matches!(validate_call("transfer", ""), Err(ValidationError::InvalidParams(_))));
    }
}
