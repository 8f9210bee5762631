use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::action::ScoreConfig;
use crate::store::{EntityMutator, EntityStore};

#[async_trait]
pub trait CandidateScorer: Send + Sync {
    /// Score a candidate and persist the result. Returns the score.
    async fn score(&self, candidate_id: Uuid, config: &ScoreConfig) -> Result<f64, String>;
}

/// Scores a candidate as the percentage of configured keywords found among
/// their skills, matched case-insensitively.
pub struct KeywordScorer {
    entities: Arc<dyn EntityStore>,
    mutator: Arc<dyn EntityMutator>,
}

impl KeywordScorer {
    pub fn new(entities: Arc<dyn EntityStore>, mutator: Arc<dyn EntityMutator>) -> Self {
        Self { entities, mutator }
    }
}

pub fn keyword_score(skills: &[String], keywords: &[String]) -> f64 {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return 0.0;
    }

    let skills: Vec<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();
    let matched = keywords.iter().filter(|k| skills.contains(k)).count();

    let score = matched as f64 * 100.0 / keywords.len() as f64;
    (score * 10.0).round() / 10.0
}

#[async_trait]
impl CandidateScorer for KeywordScorer {
    async fn score(&self, candidate_id: Uuid, config: &ScoreConfig) -> Result<f64, String> {
        let candidate = self
            .entities
            .find_candidate(candidate_id)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Candidate {candidate_id} not found"))?;

        let score = keyword_score(&candidate.skills, &config.keywords);

        self.mutator
            .set_score(candidate_id, score)
            .await
            .map_err(|e| e.to_string())?;

        tracing::debug!("Scored candidate {candidate_id}: {score}");
        Ok(score)
    }
}
