use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: String,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub status: Option<String>,
    pub skills: Vec<String>,
}

impl Candidate {
    pub const DEFAULT_STATUS: &'static str = "new";

    pub fn new(input: NewCandidate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            status: input
                .status
                .unwrap_or_else(|| Self::DEFAULT_STATUS.to_string()),
            tags: Vec::new(),
            skills: input.skills,
            score: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns false when the tag was already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        let removed = self.tags.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}
