use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::{ExecutionResult, WorkflowStats};
use crate::error::AppError;
use crate::models::{
    ExecutionLog, Trigger, TriggerEvent, Workflow, WorkflowAction, WorkflowDraft, WorkflowFilter,
};
use crate::state::SharedState;

use super::require_target;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub trigger: Option<Trigger>,
    pub actions: Option<Vec<WorkflowAction>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub payload: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub active: Option<bool>,
    pub event: Option<TriggerEvent>,
}

#[derive(Deserialize)]
pub struct LogParams {
    pub limit: Option<i64>,
}

impl WorkflowRequest {
    fn into_draft(self, default_active: bool) -> Result<WorkflowDraft, AppError> {
        let name = self
            .name
            .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
        let trigger = self
            .trigger
            .ok_or_else(|| AppError::BadRequest("trigger is required".to_string()))?;

        let draft = WorkflowDraft {
            name: name.trim().to_string(),
            description: self.description,
            is_active: self.is_active.unwrap_or(default_active),
            trigger,
            actions: self.actions.unwrap_or_default(),
        };
        draft.validate().map_err(AppError::BadRequest)?;
        Ok(draft)
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Workflow>>, AppError> {
    let filter = WorkflowFilter {
        active: params.active,
        event: params.event,
    };
    let workflows = state.workflows.list(&filter).await?;
    Ok(Json(workflows))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<Workflow>, AppError> {
    let Json(req) = payload?;
    let draft = req.into_draft(true)?;

    let workflow = state
        .workflows
        .insert(&Workflow::from_draft(draft))
        .await?;

    tracing::info!("Workflow '{}' created ({})", workflow.name, workflow.id);
    Ok(Json(workflow))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Workflow>, AppError> {
    let workflow = find_workflow(&state, id).await?;
    Ok(Json(workflow))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<Workflow>, AppError> {
    let Json(req) = payload?;
    let mut workflow = find_workflow(&state, id).await?;

    let draft = req.into_draft(workflow.is_active)?;
    workflow.apply_draft(draft);

    let workflow = state.workflows.update(&workflow).await?;
    tracing::info!("Workflow '{}' updated ({})", workflow.name, workflow.id);
    Ok(Json(workflow))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.workflows.delete(id).await? {
        return Err(AppError::NotFound("Workflow not found".to_string()));
    }

    tracing::info!("Workflow {id} deleted");
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn toggle(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Workflow>, AppError> {
    let workflow = state.workflows.toggle(id).await?;
    Ok(Json(workflow))
}

/// Manual trigger. Individual action failures are reported in the body;
/// the request itself still succeeds.
pub async fn trigger(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<ExecutionResult>, AppError> {
    let Json(req) = payload?;
    let target = require_target(req.target_type, req.target_id)?;

    let result = state
        .engine
        .trigger_manual(id, target, req.payload.unwrap_or_default())
        .await?;
    Ok(Json(result))
}

pub async fn logs(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Query(params): Query<LogParams>,
) -> Result<Json<Vec<ExecutionLog>>, AppError> {
    let logs = state.engine.logs(id, params.limit).await?;
    Ok(Json(logs))
}

pub async fn stats(State(state): State<SharedState>) -> Result<Json<WorkflowStats>, AppError> {
    let stats = state.engine.stats().await?;
    Ok(Json(stats))
}

async fn find_workflow(state: &SharedState, id: Uuid) -> Result<Workflow, AppError> {
    state
        .workflows
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workflow not found".to_string()))
}
