pub mod conditions;
pub mod executor;
pub mod presets;
pub mod template;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{
    ActionOutcome, ExecutionLog, Target, TriggerEvent, TriggerSource, Workflow, WorkflowFilter,
};
use crate::store::{ExecutionLogStore, StoreError, WorkflowStore};

pub use executor::ActionExecutor;

pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 500;

#[derive(Debug)]
pub enum EngineError {
    NotFound(String),
    Validation(String),
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            EngineError::Validation(msg) => write!(f, "Validation: {msg}"),
            EngineError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err)
    }
}

/// What a single run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub execution_id: Uuid,
    pub workflow_id: Uuid,
    pub success: bool,
    pub actions_executed: Vec<ActionOutcome>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub total_workflows: usize,
    pub active_workflows: usize,
    pub total_executions: i64,
    pub successful_executions: i64,
    pub failed_executions: i64,
    /// Percentage, 0 when nothing has run yet.
    pub success_rate: f64,
}

/// Values available to templates during a run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub workflow_name: String,
    pub target: Target,
    pub payload: Value,
}

pub struct WorkflowEngine {
    workflows: Arc<dyn WorkflowStore>,
    logs: Arc<dyn ExecutionLogStore>,
    executor: ActionExecutor,
}

impl WorkflowEngine {
    pub fn new(
        workflows: Arc<dyn WorkflowStore>,
        logs: Arc<dyn ExecutionLogStore>,
        executor: ActionExecutor,
    ) -> Self {
        Self {
            workflows,
            logs,
            executor,
        }
    }

    /// Run a workflow on demand. Conditions are not evaluated and the
    /// active flag is not checked.
    pub async fn trigger_manual(
        &self,
        workflow_id: Uuid,
        target: Target,
        payload: Value,
    ) -> Result<ExecutionResult, EngineError> {
        let workflow = self
            .workflows
            .find_by_id(workflow_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Workflow {workflow_id} not found")))?;

        if workflow.actions.is_empty() {
            return Err(EngineError::Validation(format!(
                "Workflow {workflow_id} has no actions"
            )));
        }

        self.run(&workflow, target, payload, TriggerSource::Manual, None)
            .await
    }

    /// Run every active workflow listening for `event` whose conditions
    /// match. Non-matching workflows are skipped without a log entry.
    pub async fn dispatch(
        &self,
        event: TriggerEvent,
        target: Target,
        payload: Value,
    ) -> Result<Vec<ExecutionResult>, EngineError> {
        let filter = WorkflowFilter {
            active: Some(true),
            event: Some(event),
        };
        let mut candidates = self.workflows.list(&filter).await?;
        // Oldest definition first, so dispatch order is stable.
        candidates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let context = condition_context(&target, &payload);
        let mut results = Vec::new();

        for workflow in &candidates {
            if workflow.actions.is_empty() {
                continue;
            }
            if !conditions::matches_all(&workflow.trigger.conditions, &context) {
                tracing::debug!("Workflow {} skipped: conditions not met", workflow.id);
                continue;
            }
            let result = self
                .run(
                    workflow,
                    target.clone(),
                    payload.clone(),
                    TriggerSource::Automatic,
                    Some(event),
                )
                .await?;
            results.push(result);
        }

        Ok(results)
    }

    pub async fn logs(
        &self,
        workflow_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ExecutionLog>, EngineError> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT);
        Ok(self.logs.list_by_workflow(workflow_id, limit).await?)
    }

    pub async fn stats(&self) -> Result<WorkflowStats, EngineError> {
        let workflows = self.workflows.list(&WorkflowFilter::default()).await?;
        let executions = self.logs.stats().await?;

        let success_rate = if executions.total_executions == 0 {
            0.0
        } else {
            let rate = executions.successful_executions as f64 * 100.0
                / executions.total_executions as f64;
            (rate * 10.0).round() / 10.0
        };

        Ok(WorkflowStats {
            total_workflows: workflows.len(),
            active_workflows: workflows.iter().filter(|w| w.is_active).count(),
            total_executions: executions.total_executions,
            successful_executions: executions.successful_executions,
            failed_executions: executions.failed_executions,
            success_rate,
        })
    }

    async fn run(
        &self,
        workflow: &Workflow,
        target: Target,
        payload: Value,
        source: TriggerSource,
        event: Option<TriggerEvent>,
    ) -> Result<ExecutionResult, EngineError> {
        let ctx = RunContext {
            workflow_name: workflow.name.clone(),
            target,
            payload,
        };

        let mut outcomes = Vec::with_capacity(workflow.actions.len());
        for action in workflow.ordered_actions() {
            outcomes.push(self.executor.execute(&action.kind, &ctx).await);
        }
        let success = outcomes.iter().all(|o| o.success);

        let log = ExecutionLog {
            id: Uuid::now_v7(),
            workflow_id: workflow.id,
            workflow_name: workflow.name.clone(),
            triggered_by: source,
            event,
            target_type: ctx.target.target_type.clone(),
            target_id: ctx.target.target_id,
            actions_executed: outcomes,
            success,
            executed_at: Utc::now(),
        };

        if let Err(e) = self.logs.append(&log).await {
            tracing::error!("Failed to store execution log for workflow {}: {e}", workflow.id);
            return Err(e.into());
        }
        match self.workflows.record_trigger(workflow.id, log.executed_at).await {
            Ok(()) => {}
            // Deleted mid-run. The log entry stands on its own.
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(
                    "Workflow {} was deleted during its run; trigger count not updated",
                    workflow.id
                );
            }
            Err(e) => {
                tracing::error!("Failed to update trigger count for workflow {}: {e}", workflow.id);
                return Err(e.into());
            }
        }

        tracing::info!(
            workflow = %workflow.id,
            target = %log.target_id,
            source = ?source,
            success,
            "Workflow '{}' ran {} action(s)",
            workflow.name,
            log.actions_executed.len()
        );

        Ok(ExecutionResult {
            execution_id: log.id,
            workflow_id: workflow.id,
            success,
            actions_executed: log.actions_executed,
        })
    }
}

/// The event payload plus the target reference, as seen by conditions.
fn condition_context(target: &Target, payload: &Value) -> Value {
    let mut context = match payload {
        Value::Object(map) => Value::Object(map.clone()),
        _ => json!({}),
    };
    context["targetType"] = json!(target.target_type.as_str());
    context["targetId"] = json!(target.target_id);
    context
}
