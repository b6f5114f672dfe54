//! Mock ledger and fraud services for integration tests.
//!
//! Both run as axum apps on ephemeral ports. Every request is appended to a
//! shared call log, and a mutable script decides what they answer.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use ledger_dashboard::config::DashboardConfig;

pub const FORGED: &str = "The new block has been forged";

/// What the mocks answer.
#[derive(Debug, Clone)]
pub struct Script {
    pub anomaly: bool,
    pub error: f64,
    pub mine_message: String,
    pub fail_submissions: bool,
    pub malformed_chain: bool,
    pub mine_delay: Option<Duration>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            anomaly: false,
            error: 0.01,
            mine_message: FORGED.to_string(),
            fail_submissions: false,
            malformed_chain: false,
            mine_delay: None,
        }
    }
}

#[derive(Default)]
struct Ledger {
    chain: Vec<Value>,
    pending: Vec<Value>,
    contracts: HashMap<String, Value>,
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    script: Arc<Mutex<Script>>,
    ledger: Arc<Mutex<Ledger>>,
}

impl MockState {
    fn record(&self, call: impl Into<String>, body: Option<&Value>) {
        self.calls.lock().unwrap().push(call.into());
        if let Some(body) = body {
            self.bodies.lock().unwrap().push(body.clone());
        }
    }

    fn script(&self) -> Script {
        self.script.lock().unwrap().clone()
    }
}

/// Handle on the running mocks.
pub struct MockServices {
    pub ledger_url: String,
    pub fraud_url: String,
    state: MockState,
}

impl MockServices {
    /// Calls seen so far, as `"METHOD path"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    /// JSON request bodies seen so far, in order.
    pub fn bodies(&self) -> Vec<Value> {
        self.state.bodies.lock().unwrap().clone()
    }

    pub fn script(&self, edit: impl FnOnce(&mut Script)) {
        edit(&mut self.state.script.lock().unwrap());
    }

    pub fn chain_len(&self) -> usize {
        self.state.ledger.lock().unwrap().chain.len()
    }

    /// A dashboard config pointing at these mocks.
    pub fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.ledger.base_url = self.ledger_url.clone();
        config.fraud.base_url = self.fraud_url.clone();
        config.ledger.timeout_secs = 2;
        config.fraud.timeout_secs = 2;
        config
    }
}

/// Start both mock services on ephemeral ports.
pub async fn start_mock_services() -> MockServices {
    let mut ledger = Ledger::default();
    ledger.chain.push(block(1, "1", 100, Vec::new()));

    let state = MockState {
        calls: Arc::new(Mutex::new(Vec::new())),
        bodies: Arc::new(Mutex::new(Vec::new())),
        script: Arc::new(Mutex::new(Script::default())),
        ledger: Arc::new(Mutex::new(ledger)),
    };

    let ledger_app = Router::new()
        .route("/chain", get(chain))
        .route("/transactions/new", post(new_transaction))
        .route("/mine", get(mine))
        .route("/contracts/deploy", post(deploy))
        .route("/contracts/{address}/execute", post(execute))
        .route("/contracts/{address}/state", get(contract_state))
        .with_state(state.clone());
    let fraud_app = Router::new()
        .route("/predict", post(predict))
        .with_state(state.clone());

    let ledger_addr = serve(ledger_app).await;
    let fraud_addr = serve(fraud_app).await;

    MockServices {
        ledger_url: format!("http://{}", ledger_addr),
        fraud_url: format!("http://{}", fraud_addr),
        state,
    }
}

/// Serve a router on an ephemeral port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn block(index: usize, previous_hash: &str, proof: u64, transactions: Vec<Value>) -> Value {
    json!({
        "index": index,
        "previous_hash": previous_hash,
        "proof": proof,
        "transactions": transactions,
    })
}

async fn chain(State(state): State<MockState>) -> Json<Value> {
    state.record("GET /chain", None);
    if state.script().malformed_chain {
        return Json(json!({ "chain": "not a list" }));
    }
    let ledger = state.ledger.lock().unwrap();
    Json(json!({ "chain": ledger.chain, "length": ledger.chain.len() }))
}

async fn new_transaction(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.record("POST /transactions/new", Some(&body));
    if state.script().fail_submissions {
        return (StatusCode::INTERNAL_SERVER_ERROR, "ledger unavailable").into_response();
    }
    let mut ledger = state.ledger.lock().unwrap();
    ledger.pending.push(body);
    let next = ledger.chain.len() + 1;
    (
        StatusCode::CREATED,
        Json(json!({ "message": format!("Transaction will be added to Block {}", next) })),
    )
        .into_response()
}

async fn mine(State(state): State<MockState>) -> Json<Value> {
    state.record("GET /mine", None);
    let script = state.script();
    if let Some(delay) = script.mine_delay {
        tokio::time::sleep(delay).await;
    }
    if script.mine_message != FORGED {
        return Json(json!({ "message": script.mine_message }));
    }

    let mut ledger = state.ledger.lock().unwrap();
    let index = ledger.chain.len() + 1;
    let transactions = std::mem::take(&mut ledger.pending);
    let mined = block(index, &format!("hash-{}", index - 1), 1000 + index as u64, transactions.clone());
    ledger.chain.push(mined);
    Json(json!({
        "message": FORGED,
        "index": index,
        "previous_hash": format!("hash-{}", index - 1),
        "proof": 1000 + index as u64,
        "transactions": transactions,
    }))
}

async fn deploy(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("POST /contracts/deploy", Some(&body));
    let mut ledger = state.ledger.lock().unwrap();
    let address = format!("0x{:04x}", ledger.contracts.len() + 1);
    let contract = json!({
        "address": address,
        "owner": body["owner"],
        "state": { "type": body["type"], "params": body["params"], "calls": 0 },
    });
    ledger.contracts.insert(address.clone(), contract);
    Json(json!({ "address": address }))
}

async fn execute(
    State(state): State<MockState>,
    Path(address): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("POST /contracts/{}/execute", address), Some(&body));
    let mut ledger = state.ledger.lock().unwrap();
    match ledger.contracts.get_mut(&address) {
        Some(contract) => {
            let calls = contract["state"]["calls"].as_u64().unwrap_or(0) + 1;
            contract["state"]["calls"] = json!(calls);
            contract["state"]["last_method"] = body["method"].clone();
            StatusCode::OK.into_response()
        }
        None => (StatusCode::NOT_FOUND, "unknown contract").into_response(),
    }
}

async fn contract_state(State(state): State<MockState>, Path(address): Path<String>) -> Response {
    state.record(format!("GET /contracts/{}/state", address), None);
    let ledger = state.ledger.lock().unwrap();
    match ledger.contracts.get(&address) {
        Some(contract) => Json(contract.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown contract").into_response(),
    }
}

async fn predict(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("POST /predict", Some(&body));
    let script = state.script();
    Json(json!({ "anomaly": script.anomaly, "error": script.error }))
}
