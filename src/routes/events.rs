use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ExecutionResult;
use crate::error::AppError;
use crate::models::TriggerEvent;
use crate::state::SharedState;

use super::require_target;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub event: Option<TriggerEvent>,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub payload: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct DispatchResponse {
    pub matched: usize,
    pub executions: Vec<ExecutionResult>,
}

/// Entry point for the automatic path: runs every active workflow that
/// listens for the event and whose conditions match the payload.
pub async fn dispatch(
    State(state): State<SharedState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<DispatchResponse>, AppError> {
    let Json(req) = payload?;
    let event = req
        .event
        .ok_or_else(|| AppError::BadRequest("event is required".to_string()))?;
    let target = require_target(req.target_type, req.target_id)?;

    let executions = state
        .engine
        .dispatch(event, target, req.payload.unwrap_or_default())
        .await?;

    Ok(Json(DispatchResponse {
        matched: executions.len(),
        executions,
    }))
}
