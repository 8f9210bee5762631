use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTag, Tag};
use crate::state::SharedState;

use super::candidates::required;

#[derive(Deserialize)]
pub struct CreateTag {
    pub name: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTag {
    pub candidate_ids: Option<Vec<Uuid>>,
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = state.tags.list_tags().await?;
    Ok(Json(tags))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateTag>, JsonRejection>,
) -> Result<Json<Tag>, AppError> {
    let Json(req) = payload?;
    let name = required(req.name, "name")?;

    let tag = state
        .tags
        .create_tag(NewTag {
            name,
            color: req.color,
            category: req.category,
        })
        .await?;
    Ok(Json(tag))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.tags.delete_tag(id).await? {
        return Err(AppError::NotFound("Tag not found".to_string()));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}

/// Bulk-apply a tag. Ids that match no candidate are ignored and do not
/// count towards the tag's usage.
pub async fn apply(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ApplyTag>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    let candidate_ids = req
        .candidate_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| AppError::BadRequest("candidateIds is required".to_string()))?;

    let affected = state.tags.apply_tag(id, &candidate_ids).await?;
    Ok(Json(json!({ "affected": affected })))
}
