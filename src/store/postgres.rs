use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    application_not_found, candidate_not_found, workflow_not_found, EntityMutator, EntityStore,
    ExecutionLogStore, StoreError, TagStore, WorkflowStore,
};
use crate::db;
use crate::models::{
    Application, Candidate, ExecutionLog, ExecutionStats, NewCandidate, NewTag, Tag, TargetType,
    Workflow, WorkflowFilter,
};

/// PostgreSQL backend. Every method delegates to the query functions in `db`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PgStore {
    async fn list(&self, filter: &WorkflowFilter) -> Result<Vec<Workflow>, StoreError> {
        Ok(db::workflows::list(&self.pool, filter.active, filter.event).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workflow>, StoreError> {
        Ok(db::workflows::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, workflow: &Workflow) -> Result<Workflow, StoreError> {
        Ok(db::workflows::create(&self.pool, workflow).await?)
    }

    async fn update(&self, workflow: &Workflow) -> Result<Workflow, StoreError> {
        db::workflows::update(&self.pool, workflow)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => workflow_not_found(workflow.id),
                other => other.into(),
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(db::workflows::delete(&self.pool, id).await?)
    }

    async fn toggle(&self, id: Uuid) -> Result<Workflow, StoreError> {
        db::workflows::toggle(&self.pool, id)
            .await?
            .ok_or_else(|| workflow_not_found(id))
    }

    async fn record_trigger(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        if db::workflows::record_trigger(&self.pool, id, at).await? {
            Ok(())
        } else {
            Err(workflow_not_found(id))
        }
    }
}

#[async_trait]
impl ExecutionLogStore for PgStore {
    async fn append(&self, log: &ExecutionLog) -> Result<(), StoreError> {
        Ok(db::execution_logs::create(&self.pool, log).await?)
    }

    async fn list_by_workflow(
        &self,
        workflow_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ExecutionLog>, StoreError> {
        Ok(db::execution_logs::list_by_workflow(&self.pool, workflow_id, limit).await?)
    }

    async fn stats(&self) -> Result<ExecutionStats, StoreError> {
        Ok(db::execution_logs::stats(&self.pool).await?)
    }
}

#[async_trait]
impl EntityMutator for PgStore {
    async fn set_status(
        &self,
        target_type: &TargetType,
        id: Uuid,
        status: &str,
    ) -> Result<(), StoreError> {
        match target_type {
            TargetType::Candidate => {
                if !db::candidates::set_status(&self.pool, id, status).await? {
                    return Err(candidate_not_found(id));
                }
            }
            TargetType::Application => {
                if !db::applications::set_status(&self.pool, id, status).await? {
                    return Err(application_not_found(id));
                }
            }
            other => {
                return Err(StoreError::NotFound(format!(
                    "No {other} records are stored"
                )));
            }
        }
        Ok(())
    }

    async fn add_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError> {
        if db::candidates::add_tag(&self.pool, candidate_id, tag).await? {
            Ok(())
        } else {
            Err(candidate_not_found(candidate_id))
        }
    }

    async fn remove_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError> {
        if db::candidates::remove_tag(&self.pool, candidate_id, tag).await? {
            Ok(())
        } else {
            Err(candidate_not_found(candidate_id))
        }
    }

    async fn set_score(&self, candidate_id: Uuid, score: f64) -> Result<(), StoreError> {
        if db::candidates::set_score(&self.pool, candidate_id, score).await? {
            Ok(())
        } else {
            Err(candidate_not_found(candidate_id))
        }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn create_candidate(&self, input: NewCandidate) -> Result<Candidate, StoreError> {
        let candidate = Candidate::new(input);
        Ok(db::candidates::create(&self.pool, &candidate).await?)
    }

    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        Ok(db::candidates::find_by_id(&self.pool, id).await?)
    }

    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Application, StoreError> {
        if db::candidates::find_by_id(&self.pool, candidate_id)
            .await?
            .is_none()
        {
            return Err(candidate_not_found(candidate_id));
        }
        let application = Application::new(candidate_id, job_id, status);
        Ok(db::applications::create(&self.pool, &application).await?)
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        Ok(db::applications::find_by_id(&self.pool, id).await?)
    }
}

#[async_trait]
impl TagStore for PgStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, StoreError> {
        Ok(db::tags::list(&self.pool).await?)
    }

    async fn create_tag(&self, input: NewTag) -> Result<Tag, StoreError> {
        let tag = Tag::new(input);
        Ok(db::tags::create(&self.pool, &tag).await?)
    }

    async fn find_tag(&self, id: Uuid) -> Result<Option<Tag>, StoreError> {
        Ok(db::tags::find_by_id(&self.pool, id).await?)
    }

    async fn delete_tag(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(db::tags::delete(&self.pool, id).await?)
    }

    async fn apply_tag(&self, tag_id: Uuid, candidate_ids: &[Uuid]) -> Result<u64, StoreError> {
        let tag = db::tags::find_by_id(&self.pool, tag_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Tag {tag_id} not found")))?;

        let unique: Vec<Uuid> = candidate_ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        // Tagging and the usage bump commit together.
        let mut tx = self.pool.begin().await?;
        let affected = db::candidates::add_tag_many(&mut *tx, &unique, &tag.name).await?;
        db::tags::increment_usage(&mut *tx, tag_id, affected as i64).await?;
        tx.commit().await?;
        Ok(affected)
    }
}
