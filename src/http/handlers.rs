use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::ledger::{Contract, DeployRequest};
use crate::state::TransactionDraft;
use crate::workflow::{MineOutcome, TransactionOutcome, WorkflowResult};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SelectContract {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteContract {
    pub method: String,
    /// Method parameters as JSON text.
    #[serde(default = "empty_params")]
    pub params: String,
}

fn empty_params() -> String {
    "{}".to_string()
}

#[derive(Debug, Serialize)]
pub struct DeployResponse {
    pub address: String,
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_state(State(state): State<AppState>) -> Response {
    current_state(&state)
}

pub async fn refresh_chain(State(state): State<AppState>) -> WorkflowResult<Json<serde_json::Value>> {
    let blocks = state.orchestrator.refresh_chain().await?;
    Ok(Json(json!({ "blocks": blocks })))
}

pub async fn edit_pending(
    State(state): State<AppState>,
    Json(draft): Json<TransactionDraft>,
) -> Response {
    state.orchestrator.edit_pending_transaction(draft);
    current_state(&state)
}

/// Submit the pending transaction. A non-empty body replaces the pending
/// draft once the submission slot is held.
pub async fn submit_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TransactionOutcome>, Response> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        state.orchestrator.submit_transaction().await
    } else {
        let draft: TransactionDraft = serde_json::from_slice(&body).map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, "validation", format!("invalid transaction body: {}", e))
        })?;
        state.orchestrator.submit(draft).await
    };

    result.map(Json).map_err(IntoResponse::into_response)
}

pub async fn mine(State(state): State<AppState>) -> WorkflowResult<Json<MineOutcome>> {
    Ok(Json(state.orchestrator.mine().await?))
}

pub async fn deploy_contract(
    State(state): State<AppState>,
    Json(request): Json<DeployRequest>,
) -> WorkflowResult<Json<DeployResponse>> {
    let address = state.orchestrator.deploy_contract(request).await?;
    Ok(Json(DeployResponse { address }))
}

pub async fn select_contract(
    State(state): State<AppState>,
    Json(body): Json<SelectContract>,
) -> Response {
    state.orchestrator.select_contract(&body.address);
    current_state(&state)
}

pub async fn execute_contract(
    State(state): State<AppState>,
    Json(body): Json<ExecuteContract>,
) -> WorkflowResult<Json<Contract>> {
    let contract = state
        .orchestrator
        .execute_contract(&body.method, &body.params)
        .await?;
    Ok(Json(contract))
}

pub async fn read_contract_state(State(state): State<AppState>) -> WorkflowResult<Json<Contract>> {
    Ok(Json(state.orchestrator.read_contract_state().await?))
}

pub async fn dismiss_error(State(state): State<AppState>) -> Response {
    state.orchestrator.dismiss_error();
    current_state(&state)
}

fn current_state(state: &AppState) -> Response {
    let snapshot = state.orchestrator.snapshot();
    Json(&*snapshot).into_response()
}
