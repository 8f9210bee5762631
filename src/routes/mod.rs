pub mod actions;
pub mod applications;
pub mod candidates;
pub mod events;
pub mod presets;
pub mod tags;
pub mod workflows;

use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::models::{Target, TargetType};
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Workflows
        .route(
            "/api/v1/workflows",
            get(workflows::list).post(workflows::create),
        )
        .route("/api/v1/workflows/stats", get(workflows::stats))
        .route(
            "/api/v1/workflows/{id}",
            get(workflows::get)
                .put(workflows::update)
                .delete(workflows::delete),
        )
        .route("/api/v1/workflows/{id}/toggle", post(workflows::toggle))
        .route("/api/v1/workflows/{id}/trigger", post(workflows::trigger))
        .route("/api/v1/workflows/{id}/logs", get(workflows::logs))
        // Automatic dispatch
        .route("/api/v1/events", post(events::dispatch))
        // Presets
        .route("/api/v1/presets", get(presets::list))
        .route("/api/v1/presets/{slug}/clone", post(presets::clone))
        // Action catalog
        .route("/api/v1/actions", get(actions::list))
        // Candidates & applications
        .route("/api/v1/candidates", post(candidates::create))
        .route("/api/v1/candidates/{id}", get(candidates::get))
        .route("/api/v1/applications", post(applications::create))
        .route("/api/v1/applications/{id}", get(applications::get))
        // Tags
        .route("/api/v1/tags", get(tags::list).post(tags::create))
        .route("/api/v1/tags/{id}", axum::routing::delete(tags::delete))
        .route("/api/v1/tags/{id}/apply", post(tags::apply))
}

/// Build a target from the optional request fields, reporting the first
/// missing one.
pub(crate) fn require_target(
    target_type: Option<String>,
    target_id: Option<uuid::Uuid>,
) -> Result<Target, AppError> {
    let target_type = target_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("targetType is required".to_string()))?;
    let target_id =
        target_id.ok_or_else(|| AppError::BadRequest("targetId is required".to_string()))?;
    Ok(Target::new(TargetType::from(target_type), target_id))
}
