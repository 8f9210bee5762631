use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Candidate, NewCandidate};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateCandidate>, JsonRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Json(req) = payload?;

    let name = required(req.name, "name")?;
    let email = required(req.email, "email")?;
    if !email.contains('@') {
        return Err(AppError::BadRequest("email is invalid".to_string()));
    }

    let candidate = state
        .entities
        .create_candidate(NewCandidate {
            name,
            email,
            status: req.status,
            skills: req.skills,
        })
        .await?;
    Ok(Json(candidate))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state
        .entities
        .find_candidate(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(candidate))
}

pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}
