use axum::extract::{Path, State};
use axum::Json;

use crate::engine::presets::{self as catalog, WorkflowPreset};
use crate::error::AppError;
use crate::models::Workflow;
use crate::state::SharedState;

pub async fn list() -> Json<Vec<WorkflowPreset>> {
    Json(catalog::all())
}

/// Store a copy of a preset as a new, inactive workflow.
pub async fn clone(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<Workflow>, AppError> {
    let preset = catalog::find(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Preset {slug} not found")))?;

    let workflow = state
        .workflows
        .insert(&Workflow::from_draft(preset.to_draft()))
        .await?;

    tracing::info!("Workflow '{}' created from preset {slug}", workflow.name);
    Ok(Json(workflow))
}
