pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Application, Candidate, ExecutionLog, ExecutionStats, NewCandidate, NewTag, Tag, TargetType,
    Workflow, WorkflowFilter,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Conflict(String),
    Database(sqlx::Error),
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "{msg}"),
            StoreError::Conflict(msg) => write!(f, "{msg}"),
            StoreError::Database(err) => write!(f, "Database error: {err}"),
            StoreError::Backend(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn list(&self, filter: &WorkflowFilter) -> Result<Vec<Workflow>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workflow>, StoreError>;
    async fn insert(&self, workflow: &Workflow) -> Result<Workflow, StoreError>;
    /// Replace the definition. Counters are left untouched.
    async fn update(&self, workflow: &Workflow) -> Result<Workflow, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    /// Flip `is_active` in place, leaving the rest of the definition alone.
    async fn toggle(&self, id: Uuid) -> Result<Workflow, StoreError>;
    /// Atomically bump `times_triggered` and stamp `last_triggered_at`.
    async fn record_trigger(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ExecutionLogStore: Send + Sync {
    async fn append(&self, log: &ExecutionLog) -> Result<(), StoreError>;
    /// Newest first.
    async fn list_by_workflow(
        &self,
        workflow_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ExecutionLog>, StoreError>;
    async fn stats(&self) -> Result<ExecutionStats, StoreError>;
}

/// Applies workflow effects to candidate and application records.
#[async_trait]
pub trait EntityMutator: Send + Sync {
    async fn set_status(
        &self,
        target_type: &TargetType,
        id: Uuid,
        status: &str,
    ) -> Result<(), StoreError>;
    async fn add_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError>;
    async fn remove_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError>;
    async fn set_score(&self, candidate_id: Uuid, score: f64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn create_candidate(&self, input: NewCandidate) -> Result<Candidate, StoreError>;
    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError>;
    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Application, StoreError>;
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, StoreError>;
    async fn create_tag(&self, input: NewTag) -> Result<Tag, StoreError>;
    async fn find_tag(&self, id: Uuid) -> Result<Option<Tag>, StoreError>;
    async fn delete_tag(&self, id: Uuid) -> Result<bool, StoreError>;
    /// Add the tag to every listed candidate that exists and bump the usage
    /// counter by that number. Returns the number of candidates affected.
    async fn apply_tag(&self, tag_id: Uuid, candidate_ids: &[Uuid]) -> Result<u64, StoreError>;
}

/// Everything a backend has to provide to run the service.
pub trait Store:
    WorkflowStore + ExecutionLogStore + EntityMutator + EntityStore + TagStore
{
}

impl<T> Store for T where
    T: WorkflowStore + ExecutionLogStore + EntityMutator + EntityStore + TagStore
{
}

pub(crate) fn workflow_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("Workflow {id} not found"))
}

pub(crate) fn candidate_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("Candidate {id} not found"))
}

pub(crate) fn application_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("Application {id} not found"))
}
