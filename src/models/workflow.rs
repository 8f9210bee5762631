use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkflowAction;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    #[sqlx(json)]
    pub trigger: Trigger,
    #[sqlx(json)]
    pub actions: Vec<WorkflowAction>,
    pub times_triggered: i64,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub event: TriggerEvent,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "trigger_event", rename_all = "snake_case")]
pub enum TriggerEvent {
    CandidateCreated,
    ApplicationSubmitted,
    StatusChanged,
    InterviewScheduled,
    InterviewCompleted,
    OfferSent,
    OfferAccepted,
    OfferDeclined,
    TagAdded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

/// Definition fields shared by create, update and preset cloning.
#[derive(Debug, Clone)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub trigger: Trigger,
    pub actions: Vec<WorkflowAction>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowFilter {
    pub active: Option<bool>,
    pub event: Option<TriggerEvent>,
}

impl Workflow {
    pub fn from_draft(draft: WorkflowDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            description: draft.description,
            is_active: draft.is_active,
            trigger: draft.trigger,
            actions: draft.actions,
            times_triggered: 0,
            last_triggered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the definition, keeping identity and counters.
    pub fn apply_draft(&mut self, draft: WorkflowDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.is_active = draft.is_active;
        self.trigger = draft.trigger;
        self.actions = draft.actions;
        self.updated_at = Utc::now();
    }

    /// Actions in execution order. `sort_by_key` is stable, so equal
    /// `order` values keep their list position.
    pub fn ordered_actions(&self) -> Vec<&WorkflowAction> {
        let mut actions: Vec<&WorkflowAction> = self.actions.iter().collect();
        actions.sort_by_key(|a| a.order);
        actions
    }
}

impl WorkflowFilter {
    pub fn matches(&self, workflow: &Workflow) -> bool {
        self.active.is_none_or(|active| workflow.is_active == active)
            && self.event.is_none_or(|event| workflow.trigger.event == event)
    }
}

impl WorkflowDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.actions.is_empty() {
            return Err("at least one action is required".to_string());
        }
        for action in &self.actions {
            action.kind.validate()?;
        }
        for condition in &self.trigger.conditions {
            if condition.field.trim().is_empty() {
                return Err("condition field is required".to_string());
            }
        }
        Ok(())
    }
}
