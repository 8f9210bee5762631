use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Action type names accepted when a workflow is written.
pub const ACTION_TYPES: &[&str] = &[
    "update_status",
    "add_tag",
    "remove_tag",
    "send_notification",
    "send_email",
    "send_slack",
    "delay",
    "score_candidate",
    "create_task",
    "assign_to",
];

/// One step of a workflow. On the wire this is `{type, config, order}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub struct WorkflowAction {
    pub kind: ActionKind,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    UpdateStatus(StatusConfig),
    AddTag(TagConfig),
    RemoveTag(TagConfig),
    SendNotification(NotificationConfig),
    SendEmail(EmailConfig),
    SendSlack(SlackConfig),
    Delay(DelayConfig),
    ScoreCandidate(ScoreConfig),
    /// A type with no handler. Kept so stored workflows always load;
    /// executing it reports a failure naming the type.
    Unsupported {
        action_type: String,
        config: serde_json::Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayConfig {
    pub duration_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub order: i32,
}

impl WorkflowAction {
    pub fn new(kind: ActionKind, order: i32) -> Self {
        Self { kind, order }
    }
}

impl ActionKind {
    pub fn type_name(&self) -> &str {
        match self {
            ActionKind::UpdateStatus(_) => "update_status",
            ActionKind::AddTag(_) => "add_tag",
            ActionKind::RemoveTag(_) => "remove_tag",
            ActionKind::SendNotification(_) => "send_notification",
            ActionKind::SendEmail(_) => "send_email",
            ActionKind::SendSlack(_) => "send_slack",
            ActionKind::Delay(_) => "delay",
            ActionKind::ScoreCandidate(_) => "score_candidate",
            ActionKind::Unsupported { action_type, .. } => action_type,
        }
    }

    /// Check config values that parse but are still unusable.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ActionKind::UpdateStatus(c) => require("status", &c.status),
            ActionKind::AddTag(c) | ActionKind::RemoveTag(c) => require("tag", &c.tag),
            ActionKind::SendNotification(c) => require("message", &c.message),
            ActionKind::SendEmail(c) => {
                require("to", &c.to)?;
                require("subject", &c.subject)?;
                require("body", &c.body)
            }
            ActionKind::SendSlack(c) => require("message", &c.message),
            ActionKind::Delay(_) => Ok(()),
            ActionKind::ScoreCandidate(c) => {
                if c.keywords.iter().all(|k| k.trim().is_empty()) {
                    Err("score_candidate: keywords must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
            ActionKind::Unsupported { action_type, .. } => {
                if ACTION_TYPES.contains(&action_type.as_str()) {
                    Ok(())
                } else {
                    Err(format!("Unknown action type: {action_type}"))
                }
            }
        }
        .map_err(|e| {
            if e.contains(self.type_name()) {
                e
            } else {
                format!("{}: {e}", self.type_name())
            }
        })
    }

    fn config_value(&self) -> serde_json::Value {
        let value = match self {
            ActionKind::UpdateStatus(c) => serde_json::to_value(c),
            ActionKind::AddTag(c) | ActionKind::RemoveTag(c) => serde_json::to_value(c),
            ActionKind::SendNotification(c) => serde_json::to_value(c),
            ActionKind::SendEmail(c) => serde_json::to_value(c),
            ActionKind::SendSlack(c) => serde_json::to_value(c),
            ActionKind::Delay(c) => serde_json::to_value(c),
            ActionKind::ScoreCandidate(c) => serde_json::to_value(c),
            ActionKind::Unsupported { config, .. } => Ok(config.clone()),
        };
        value.unwrap_or_default()
    }

    /// Config schemas for the action types that have a handler.
    pub fn catalog() -> Vec<serde_json::Value> {
        vec![
            json!({
                "type": "update_status",
                "name": "Update status",
                "config_schema": {
                    "type": "object",
                    "properties": { "status": { "type": "string" } },
                    "required": ["status"]
                }
            }),
            json!({
                "type": "add_tag",
                "name": "Add tag",
                "config_schema": {
                    "type": "object",
                    "properties": { "tag": { "type": "string" } },
                    "required": ["tag"]
                }
            }),
            json!({
                "type": "remove_tag",
                "name": "Remove tag",
                "config_schema": {
                    "type": "object",
                    "properties": { "tag": { "type": "string" } },
                    "required": ["tag"]
                }
            }),
            json!({
                "type": "send_notification",
                "name": "In-app notification",
                "config_schema": {
                    "type": "object",
                    "properties": {
                        "recipient": { "type": "string" },
                        "message": { "type": "string", "description": "Supports {{placeholders}}" }
                    },
                    "required": ["message"]
                }
            }),
            json!({
                "type": "send_email",
                "name": "Email",
                "config_schema": {
                    "type": "object",
                    "properties": {
                        "to": { "type": "string", "description": "Recipient (supports {{payload.email}})" },
                        "subject": { "type": "string" },
                        "body": { "type": "string" }
                    },
                    "required": ["to", "subject", "body"]
                }
            }),
            json!({
                "type": "send_slack",
                "name": "Chat message",
                "config_schema": {
                    "type": "object",
                    "properties": {
                        "channel": { "type": "string" },
                        "message": { "type": "string" }
                    },
                    "required": ["message"]
                }
            }),
            json!({
                "type": "delay",
                "name": "Delay",
                "config_schema": {
                    "type": "object",
                    "properties": {
                        "durationSecs": {
                            "type": "integer",
                            "description": "Scheduling hint only; runs do not wait"
                        }
                    },
                    "required": ["durationSecs"]
                }
            }),
            json!({
                "type": "score_candidate",
                "name": "Score candidate",
                "config_schema": {
                    "type": "object",
                    "properties": {
                        "keywords": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["keywords"]
                }
            }),
        ]
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

fn parse<T: DeserializeOwned>(action_type: &str, config: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(config).map_err(|e| format!("Invalid config for {action_type}: {e}"))
}

impl TryFrom<RawAction> for WorkflowAction {
    type Error = String;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let RawAction {
            action_type,
            config,
            order,
        } = raw;

        let kind = match action_type.as_str() {
            "update_status" => ActionKind::UpdateStatus(parse(&action_type, config)?),
            "add_tag" => ActionKind::AddTag(parse(&action_type, config)?),
            "remove_tag" => ActionKind::RemoveTag(parse(&action_type, config)?),
            "send_notification" => ActionKind::SendNotification(parse(&action_type, config)?),
            "send_email" => ActionKind::SendEmail(parse(&action_type, config)?),
            "send_slack" => ActionKind::SendSlack(parse(&action_type, config)?),
            "delay" => ActionKind::Delay(parse(&action_type, config)?),
            "score_candidate" => ActionKind::ScoreCandidate(parse(&action_type, config)?),
            _ => ActionKind::Unsupported {
                action_type,
                config,
            },
        };

        Ok(WorkflowAction { kind, order })
    }
}

impl From<WorkflowAction> for RawAction {
    fn from(action: WorkflowAction) -> Self {
        RawAction {
            action_type: action.kind.type_name().to_string(),
            config: action.kind.config_value(),
            order: action.order,
        }
    }
}
