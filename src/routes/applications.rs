use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Application;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub candidate_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub status: Option<String>,
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateApplication>, JsonRejection>,
) -> Result<Json<Application>, AppError> {
    let Json(req) = payload?;
    let candidate_id = req
        .candidate_id
        .ok_or_else(|| AppError::BadRequest("candidateId is required".to_string()))?;

    let application = state
        .entities
        .create_application(candidate_id, req.job_id, req.status)
        .await?;
    Ok(Json(application))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = state
        .entities
        .find_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    Ok(Json(application))
}
