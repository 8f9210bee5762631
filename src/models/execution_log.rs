use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TargetType, TriggerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "trigger_source", rename_all = "lowercase")]
pub enum TriggerSource {
    Manual,
    Automatic,
}

/// Audit record of one workflow run. Workflow name is a snapshot so the
/// record survives the workflow being renamed or deleted.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLog {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub workflow_name: String,
    pub triggered_by: TriggerSource,
    pub event: Option<TriggerEvent>,
    #[sqlx(try_from = "String")]
    pub target_type: TargetType,
    pub target_id: Uuid,
    #[sqlx(json)]
    pub actions_executed: Vec<ActionOutcome>,
    pub success: bool,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    #[serde(rename = "type")]
    pub action_type: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    pub total_executions: i64,
    pub successful_executions: i64,
    pub failed_executions: i64,
}

impl ActionOutcome {
    pub fn succeeded(action_type: &str) -> Self {
        Self {
            action_type: action_type.to_string(),
            success: true,
            error: None,
            executed_at: Utc::now(),
        }
    }

    pub fn failed(action_type: &str, error: impl Into<String>) -> Self {
        Self {
            action_type: action_type.to_string(),
            success: false,
            error: Some(error.into()),
            executed_at: Utc::now(),
        }
    }
}
