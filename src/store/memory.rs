// In-memory backend used when no DATABASE_URL is configured, and by tests.
// Data is lost on restart.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::{
    application_not_found, candidate_not_found, workflow_not_found, EntityMutator, EntityStore,
    ExecutionLogStore, StoreError, TagStore, WorkflowStore,
};
use crate::models::{
    Application, Candidate, ExecutionLog, ExecutionStats, NewCandidate, NewTag, Tag, TargetType,
    Workflow, WorkflowFilter,
};

#[derive(Default)]
pub struct MemoryStore {
    workflows: DashMap<Uuid, Workflow>,
    logs: DashMap<Uuid, ExecutionLog>,
    candidates: DashMap<Uuid, Candidate>,
    applications: DashMap<Uuid, Application>,
    tags: DashMap<Uuid, Tag>,
    // Unique keys, reserved through `entry()` before the record is stored.
    candidate_emails: DashMap<String, Uuid>,
    tag_names: DashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn list(&self, filter: &WorkflowFilter) -> Result<Vec<Workflow>, StoreError> {
        let mut workflows: Vec<Workflow> = self
            .workflows
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        workflows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(workflows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Workflow>, StoreError> {
        Ok(self.workflows.get(&id).map(|w| w.clone()))
    }

    async fn insert(&self, workflow: &Workflow) -> Result<Workflow, StoreError> {
        self.workflows.insert(workflow.id, workflow.clone());
        Ok(workflow.clone())
    }

    async fn update(&self, workflow: &Workflow) -> Result<Workflow, StoreError> {
        let mut entry = self
            .workflows
            .get_mut(&workflow.id)
            .ok_or_else(|| workflow_not_found(workflow.id))?;
        let stored = entry.value_mut();
        stored.name = workflow.name.clone();
        stored.description = workflow.description.clone();
        stored.is_active = workflow.is_active;
        stored.trigger = workflow.trigger.clone();
        stored.actions = workflow.actions.clone();
        stored.updated_at = workflow.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.workflows.remove(&id).is_some())
    }

    async fn toggle(&self, id: Uuid) -> Result<Workflow, StoreError> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or_else(|| workflow_not_found(id))?;
        entry.is_active = !entry.is_active;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn record_trigger(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        // The entry guard holds the shard lock, so concurrent runs never lose
        // an increment.
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or_else(|| workflow_not_found(id))?;
        entry.times_triggered += 1;
        entry.last_triggered_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl ExecutionLogStore for MemoryStore {
    async fn append(&self, log: &ExecutionLog) -> Result<(), StoreError> {
        self.logs.insert(log.id, log.clone());
        Ok(())
    }

    async fn list_by_workflow(
        &self,
        workflow_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ExecutionLog>, StoreError> {
        let mut logs: Vec<ExecutionLog> = self
            .logs
            .iter()
            .filter(|entry| entry.workflow_id == workflow_id)
            .map(|entry| entry.value().clone())
            .collect();
        // v7 ids are time-ordered, so they break timestamp ties.
        logs.sort_by(|a, b| b.executed_at.cmp(&a.executed_at).then(b.id.cmp(&a.id)));
        logs.truncate(limit.max(0) as usize);
        Ok(logs)
    }

    async fn stats(&self) -> Result<ExecutionStats, StoreError> {
        let mut stats = ExecutionStats::default();
        for entry in self.logs.iter() {
            stats.total_executions += 1;
            if entry.success {
                stats.successful_executions += 1;
            } else {
                stats.failed_executions += 1;
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl EntityMutator for MemoryStore {
    async fn set_status(
        &self,
        target_type: &TargetType,
        id: Uuid,
        status: &str,
    ) -> Result<(), StoreError> {
        match target_type {
            TargetType::Candidate => {
                let mut candidate = self
                    .candidates
                    .get_mut(&id)
                    .ok_or_else(|| candidate_not_found(id))?;
                candidate.status = status.to_string();
                candidate.updated_at = Utc::now();
                Ok(())
            }
            TargetType::Application => {
                let mut application = self
                    .applications
                    .get_mut(&id)
                    .ok_or_else(|| application_not_found(id))?;
                application.status = status.to_string();
                application.updated_at = Utc::now();
                Ok(())
            }
            other => Err(StoreError::NotFound(format!("No {other} records are stored"))),
        }
    }

    async fn add_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError> {
        let mut candidate = self
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| candidate_not_found(candidate_id))?;
        candidate.add_tag(tag);
        Ok(())
    }

    async fn remove_tag(&self, candidate_id: Uuid, tag: &str) -> Result<(), StoreError> {
        let mut candidate = self
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| candidate_not_found(candidate_id))?;
        candidate.remove_tag(tag);
        Ok(())
    }

    async fn set_score(&self, candidate_id: Uuid, score: f64) -> Result<(), StoreError> {
        let mut candidate = self
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| candidate_not_found(candidate_id))?;
        candidate.score = Some(score);
        candidate.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn create_candidate(&self, input: NewCandidate) -> Result<Candidate, StoreError> {
        let candidate = Candidate::new(input);
        match self.candidate_emails.entry(candidate.email.to_lowercase()) {
            Entry::Occupied(_) => {
                return Err(StoreError::Conflict(format!(
                    "Candidate with email {} already exists",
                    candidate.email
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate.id);
            }
        }
        self.candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        Ok(self.candidates.get(&id).map(|c| c.clone()))
    }

    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Option<Uuid>,
        status: Option<String>,
    ) -> Result<Application, StoreError> {
        if !self.candidates.contains_key(&candidate_id) {
            return Err(candidate_not_found(candidate_id));
        }
        let application = Application::new(candidate_id, job_id, status);
        self.applications
            .insert(application.id, application.clone());
        Ok(application)
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        Ok(self.applications.get(&id).map(|a| a.clone()))
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, StoreError> {
        let mut tags: Vec<Tag> = self.tags.iter().map(|t| t.value().clone()).collect();
        tags.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(tags)
    }

    async fn create_tag(&self, input: NewTag) -> Result<Tag, StoreError> {
        let tag = Tag::new(input);
        match self.tag_names.entry(tag.name.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::Conflict(format!("Tag {} already exists", tag.name)));
            }
            Entry::Vacant(slot) => {
                slot.insert(tag.id);
            }
        }
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_tag(&self, id: Uuid) -> Result<Option<Tag>, StoreError> {
        Ok(self.tags.get(&id).map(|t| t.clone()))
    }

    async fn delete_tag(&self, id: Uuid) -> Result<bool, StoreError> {
        match self.tags.remove(&id) {
            Some((_, tag)) => {
                self.tag_names.remove(&tag.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn apply_tag(&self, tag_id: Uuid, candidate_ids: &[Uuid]) -> Result<u64, StoreError> {
        let name = self
            .tags
            .get(&tag_id)
            .map(|t| t.name.clone())
            .ok_or_else(|| StoreError::NotFound(format!("Tag {tag_id} not found")))?;

        let unique: HashSet<&Uuid> = candidate_ids.iter().collect();
        let mut affected = 0;
        for id in unique {
            if let Some(mut candidate) = self.candidates.get_mut(id) {
                candidate.add_tag(&name);
                affected += 1;
            }
        }

        if let Some(mut tag) = self.tags.get_mut(&tag_id) {
            tag.usage_count += affected as i64;
        }
        Ok(affected)
    }
}
