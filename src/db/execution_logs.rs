use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ExecutionLog, ExecutionStats};

pub async fn create(pool: &PgPool, log: &ExecutionLog) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO execution_logs
            (id, workflow_id, workflow_name, triggered_by, event, target_type, target_id,
             actions_executed, success, executed_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(log.id)
    .bind(log.workflow_id)
    .bind(&log.workflow_name)
    .bind(log.triggered_by)
    .bind(log.event)
    .bind(log.target_type.as_str())
    .bind(log.target_id)
    .bind(Json(&log.actions_executed))
    .bind(log.success)
    .bind(log.executed_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_by_workflow(
    pool: &PgPool,
    workflow_id: Uuid,
    limit: i64,
) -> Result<Vec<ExecutionLog>, sqlx::Error> {
    sqlx::query_as::<_, ExecutionLog>(
        "SELECT * FROM execution_logs WHERE workflow_id = $1
         ORDER BY executed_at DESC, id DESC LIMIT $2",
    )
    .bind(workflow_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn stats(pool: &PgPool) -> Result<ExecutionStats, sqlx::Error> {
    let (total, successful): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE success) FROM execution_logs",
    )
    .fetch_one(pool)
    .await?;

    Ok(ExecutionStats {
        total_executions: total,
        successful_executions: successful,
        failed_executions: total - successful,
    })
}
