use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Candidate;

pub async fn create(pool: &PgPool, candidate: &Candidate) -> Result<Candidate, sqlx::Error> {
    sqlx::query_as::<_, Candidate>(
        "INSERT INTO candidates (id, name, email, status, tags, skills, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(candidate.id)
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(&candidate.status)
    .bind(&candidate.tags)
    .bind(&candidate.skills)
    .bind(candidate.created_at)
    .bind(candidate.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Candidate>, sqlx::Error> {
    sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn set_status(pool: &PgPool, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE candidates SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Appends the tag unless already present. Returns false if the candidate
/// does not exist.
pub async fn add_tag(pool: &PgPool, id: Uuid, tag: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE candidates
         SET tags = CASE WHEN $2 = ANY(tags) THEN tags ELSE array_append(tags, $2) END,
             updated_at = now()
         WHERE id = $1",
    )
    .bind(id)
    .bind(tag)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn add_tag_many<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    ids: &[Uuid],
    tag: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE candidates
         SET tags = CASE WHEN $2 = ANY(tags) THEN tags ELSE array_append(tags, $2) END,
             updated_at = now()
         WHERE id = ANY($1)",
    )
    .bind(ids)
    .bind(tag)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn remove_tag(pool: &PgPool, id: Uuid, tag: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE candidates SET tags = array_remove(tags, $2), updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(tag)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_score(pool: &PgPool, id: Uuid, score: f64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE candidates SET score = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(score)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
