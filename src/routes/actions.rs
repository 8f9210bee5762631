use axum::Json;
use serde_json::json;

use crate::models::ActionKind;

pub async fn list() -> Json<serde_json::Value> {
    Json(json!({ "actions": ActionKind::catalog() }))
}
