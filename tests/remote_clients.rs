//! HTTP clients against the mock collaborators.

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::time::Duration;

use ledger_dashboard::fraud::{FraudClient, FraudScorer, ScoringContext};
use ledger_dashboard::ledger::{Amount, ContractCall, DeployRequest, LedgerApi, LedgerClient, Transaction};
use ledger_dashboard::remote::RemoteError;

mod common;

fn transaction(amount: &str) -> Transaction {
    Transaction {
        sender: "alice".to_string(),
        recipient: "bob".to_string(),
        amount: Amount::parse(amount).unwrap(),
    }
}

#[tokio::test]
async fn test_ledger_round_trip() {
    let mocks = common::start_mock_services().await;
    let config = mocks.config();
    let ledger = LedgerClient::new(&config.ledger).unwrap();

    let chain = ledger.read_chain().await.unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].proof, 100);

    let receipt = ledger.submit_transaction(&transaction("10")).await.unwrap();
    assert_eq!(receipt.message, "Transaction will be added to Block 2");

    let mined = ledger.mine().await.unwrap();
    assert!(mined.is_forged());
    assert_eq!(mined.index, 2);
    assert_eq!(mined.transactions, vec![transaction("10")]);

    let chain = ledger.read_chain().await.unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].transactions[0].amount.as_str(), "10");

    assert_eq!(
        mocks.calls(),
        vec!["GET /chain", "POST /transactions/new", "GET /mine", "GET /chain"]
    );
    // Amounts travel as the operator typed them.
    assert_eq!(
        mocks.bodies()[0],
        json!({"sender": "alice", "recipient": "bob", "amount": "10"})
    );
}

#[tokio::test]
async fn test_contract_calls() {
    let mocks = common::start_mock_services().await;
    let ledger = LedgerClient::new(&mocks.config().ledger).unwrap();

    let receipt = ledger
        .deploy_contract(&DeployRequest::token("alice", 1000))
        .await
        .unwrap();
    assert_eq!(receipt.address, "0x0001");

    let call = ContractCall {
        method: "transfer".to_string(),
        params: json!({"to": "bob", "amount": 5}),
    };
    ledger.execute_contract(&receipt.address, &call).await.unwrap();

    let contract = ledger.read_contract_state(&receipt.address).await.unwrap();
    assert_eq!(contract.owner, "alice");
    assert_eq!(contract.state["calls"], 1);
    assert_eq!(contract.state["last_method"], "transfer");

    assert_eq!(
        mocks.bodies()[0],
        json!({"owner": "alice", "type": "token", "params": {"initial_supply": 1000}})
    );
}

#[tokio::test]
async fn test_unknown_contract_is_status_error() {
    let mocks = common::start_mock_services().await;
    let ledger = LedgerClient::new(&mocks.config().ledger).unwrap();

    let err = ledger.read_contract_state("0xdead").await.unwrap_err();
    match err {
        RemoteError::Status { status, ref body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(body, "unknown contract");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_chain_is_schema_error() {
    let mocks = common::start_mock_services().await;
    mocks.script(|s| s.malformed_chain = true);
    let ledger = LedgerClient::new(&mocks.config().ledger).unwrap();

    let err = ledger.read_chain().await.unwrap_err();
    assert_eq!(err.kind(), "schema");
}

#[tokio::test]
async fn test_chain_length_mismatch_is_schema_error() {
    let app = Router::new().route(
        "/chain",
        get(|| async { Json(json!({"chain": [], "length": 3})) }),
    );
    let addr = common::serve(app).await;
    let mut config = common::start_mock_services().await.config();
    config.ledger.base_url = format!("http://{}", addr);
    let ledger = LedgerClient::new(&config.ledger).unwrap();

    let err = ledger.read_chain().await.unwrap_err();
    assert!(matches!(err, RemoteError::Schema { operation: "read_chain", .. }));
}

#[tokio::test]
async fn test_failed_submission_is_status_error() {
    let mocks = common::start_mock_services().await;
    mocks.script(|s| s.fail_submissions = true);
    let ledger = LedgerClient::new(&mocks.config().ledger).unwrap();

    let err = ledger.submit_transaction(&transaction("10")).await.unwrap_err();
    assert!(matches!(err, RemoteError::Status { status: 500, .. }));
    assert_eq!(
        err.to_string(),
        "ledger submit_transaction returned status 500: ledger unavailable"
    );
}

#[tokio::test]
async fn test_unforged_mine_keeps_message() {
    let mocks = common::start_mock_services().await;
    mocks.script(|s| s.mine_message = "No proof found".to_string());
    let ledger = LedgerClient::new(&mocks.config().ledger).unwrap();

    let result = ledger.mine().await.unwrap();
    assert!(!result.is_forged());
    assert_eq!(result.message, "No proof found");
    assert_eq!(mocks.chain_len(), 1);
}

#[tokio::test]
async fn test_slow_mine_times_out() {
    let mocks = common::start_mock_services().await;
    mocks.script(|s| s.mine_delay = Some(Duration::from_millis(2500)));
    let mut config = mocks.config();
    config.ledger.timeout_secs = 1;
    let ledger = LedgerClient::new(&config.ledger).unwrap();

    let err = ledger.mine().await.unwrap_err();
    assert!(matches!(err, RemoteError::Timeout { operation: "mine", secs: 1, .. }));
}

#[tokio::test]
async fn test_fraud_score_request() {
    let mocks = common::start_mock_services().await;
    mocks.script(|s| {
        s.anomaly = true;
        s.error = 0.92;
    });
    let fraud = FraudClient::new(&mocks.config().fraud).unwrap();

    let assessment = fraud
        .score(&transaction("12.5"), &ScoringContext::default())
        .await
        .unwrap();
    assert!(assessment.anomaly);
    assert_eq!(assessment.error, 0.92);

    assert_eq!(
        mocks.bodies()[0],
        json!({
            "transaction_value": 12.5,
            "frequency": 1,
            "latitude": 1.3521,
            "longitude": 103.8198,
            "location_deviation": 0.0,
        })
    );
}

#[tokio::test]
async fn test_fraud_body_missing_fields_is_schema_error() {
    let app = Router::new().route(
        "/predict",
        axum::routing::post(|| async { (StatusCode::OK, Json(json!({"anomaly": false}))) }),
    );
    let addr = common::serve(app).await;
    let mut config = common::start_mock_services().await.config();
    config.fraud.base_url = format!("http://{}", addr);
    let fraud = FraudClient::new(&config.fraud).unwrap();

    let err = fraud
        .score(&transaction("1"), &ScoringContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Schema { operation: "score", .. }));
}
