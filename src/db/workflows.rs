use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{TriggerEvent, Workflow};

pub async fn list(
    pool: &PgPool,
    active: Option<bool>,
    event: Option<TriggerEvent>,
) -> Result<Vec<Workflow>, sqlx::Error> {
    sqlx::query_as::<_, Workflow>(
        "SELECT * FROM workflows
         WHERE ($1::boolean IS NULL OR is_active = $1)
           AND ($2::trigger_event IS NULL OR trigger_event = $2)
         ORDER BY created_at DESC, id DESC",
    )
    .bind(active)
    .bind(event)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Workflow>, sqlx::Error> {
    sqlx::query_as::<_, Workflow>("SELECT * FROM workflows WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, workflow: &Workflow) -> Result<Workflow, sqlx::Error> {
    sqlx::query_as::<_, Workflow>(
        "INSERT INTO workflows
            (id, name, description, is_active, trigger_event, trigger, actions, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(workflow.id)
    .bind(&workflow.name)
    .bind(&workflow.description)
    .bind(workflow.is_active)
    .bind(workflow.trigger.event)
    .bind(Json(&workflow.trigger))
    .bind(Json(&workflow.actions))
    .bind(workflow.created_at)
    .bind(workflow.updated_at)
    .fetch_one(pool)
    .await
}

/// Replace the definition. `times_triggered` and `last_triggered_at` are
/// only ever written by `record_trigger`.
pub async fn update(pool: &PgPool, workflow: &Workflow) -> Result<Workflow, sqlx::Error> {
    sqlx::query_as::<_, Workflow>(
        "UPDATE workflows
         SET name = $2, description = $3, is_active = $4, trigger_event = $5,
             trigger = $6, actions = $7, updated_at = $8
         WHERE id = $1 RETURNING *",
    )
    .bind(workflow.id)
    .bind(&workflow.name)
    .bind(&workflow.description)
    .bind(workflow.is_active)
    .bind(workflow.trigger.event)
    .bind(Json(&workflow.trigger))
    .bind(Json(&workflow.actions))
    .bind(workflow.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM workflows WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn toggle(pool: &PgPool, id: Uuid) -> Result<Option<Workflow>, sqlx::Error> {
    sqlx::query_as::<_, Workflow>(
        "UPDATE workflows SET is_active = NOT is_active, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Single-statement increment, safe under concurrent runs.
pub async fn record_trigger(
    pool: &PgPool,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE workflows
         SET times_triggered = times_triggered + 1, last_triggered_at = $2
         WHERE id = $1",
    )
    .bind(id)
    .bind(at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
