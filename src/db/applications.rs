use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Application;

pub async fn create(pool: &PgPool, application: &Application) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "INSERT INTO applications (id, candidate_id, job_id, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(application.id)
    .bind(application.candidate_id)
    .bind(application.job_id)
    .bind(&application.status)
    .bind(application.created_at)
    .bind(application.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn set_status(pool: &PgPool, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE applications SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
