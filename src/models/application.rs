use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub const DEFAULT_STATUS: &'static str = "submitted";

    pub fn new(candidate_id: Uuid, job_id: Option<Uuid>, status: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            candidate_id,
            job_id,
            status: status.unwrap_or_else(|| Self::DEFAULT_STATUS.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}
