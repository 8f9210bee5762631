use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub category: String,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl Tag {
    pub const DEFAULT_COLOR: &'static str = "#6b7280";
    pub const DEFAULT_CATEGORY: &'static str = "general";

    pub fn new(input: NewTag) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            color: input.color.unwrap_or_else(|| Self::DEFAULT_COLOR.to_string()),
            category: input
                .category
                .unwrap_or_else(|| Self::DEFAULT_CATEGORY.to_string()),
            usage_count: 0,
            created_at: Utc::now(),
        }
    }
}
