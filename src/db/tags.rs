use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Tag;

pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY category ASC, name ASC")
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, tag: &Tag) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (id, name, color, category, created_at)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(tag.id)
    .bind(&tag.name)
    .bind(&tag.color)
    .bind(&tag.category)
    .bind(tag.created_at)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn increment_usage<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    by: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE tags SET usage_count = usage_count + $2 WHERE id = $1")
        .bind(id)
        .bind(by)
        .execute(executor)
        .await?;
    Ok(())
}
