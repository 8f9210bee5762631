use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entity a workflow run acts on. Unrecognized kinds are kept
/// verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    Candidate,
    Application,
    Job,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

impl TargetType {
    pub fn as_str(&self) -> &str {
        match self {
            TargetType::Candidate => "candidate",
            TargetType::Application => "application",
            TargetType::Job => "job",
            TargetType::Other(kind) => kind,
        }
    }
}

impl From<String> for TargetType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "candidate" => TargetType::Candidate,
            "application" => TargetType::Application,
            "job" => TargetType::Job,
            _ => TargetType::Other(value),
        }
    }
}

impl From<TargetType> for String {
    fn from(value: TargetType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Target {
    pub fn new(target_type: TargetType, target_id: Uuid) -> Self {
        Self {
            target_type,
            target_id,
        }
    }
}
