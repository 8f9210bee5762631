//! Example workflow definitions operators can clone as a starting point.

use serde::Serialize;
use serde_json::json;

use crate::models::action::{
    EmailConfig, NotificationConfig, ScoreConfig, SlackConfig, StatusConfig, TagConfig,
};
use crate::models::{
    ActionKind, Condition, ConditionOperator, Trigger, TriggerEvent, WorkflowAction,
    WorkflowDraft,
};

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowPreset {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger: Trigger,
    pub actions: Vec<WorkflowAction>,
}

impl WorkflowPreset {
    /// Cloned presets start inactive so they can be reviewed first.
    pub fn to_draft(&self) -> WorkflowDraft {
        WorkflowDraft {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            is_active: false,
            trigger: self.trigger.clone(),
            actions: self.actions.clone(),
        }
    }
}

pub fn find(slug: &str) -> Option<WorkflowPreset> {
    all().into_iter().find(|p| p.slug == slug)
}

pub fn all() -> Vec<WorkflowPreset> {
    vec![
        WorkflowPreset {
            slug: "welcome-applicant",
            name: "Welcome new applicants",
            description: "Acknowledge every new application by email and tag it for screening.",
            trigger: Trigger {
                event: TriggerEvent::ApplicationSubmitted,
                conditions: vec![],
            },
            actions: vec![
                action(
                    ActionKind::SendEmail(EmailConfig {
                        to: "{{payload.email}}".to_string(),
                        subject: "We received your application".to_string(),
                        body: "Hi {{payload.name}}, thanks for applying. We will be in touch soon."
                            .to_string(),
                    }),
                    1,
                ),
                action(tag("to-screen"), 2),
            ],
        },
        WorkflowPreset {
            slug: "fast-track-senior",
            name: "Fast-track senior candidates",
            description: "Tag candidates with extensive experience and alert the hiring channel.",
            trigger: Trigger {
                event: TriggerEvent::CandidateCreated,
                conditions: vec![Condition {
                    field: "experienceYears".to_string(),
                    operator: ConditionOperator::GreaterThan,
                    value: json!(7),
                }],
            },
            actions: vec![
                action(tag("senior"), 1),
                action(
                    ActionKind::SendSlack(SlackConfig {
                        channel: Some("#hiring".to_string()),
                        message: "Senior candidate {{payload.name}} just entered the pipeline."
                            .to_string(),
                    }),
                    2,
                ),
            ],
        },
        WorkflowPreset {
            slug: "score-engineering-applicants",
            name: "Score engineering applicants",
            description: "Score applicants to engineering roles against a core skill list.",
            trigger: Trigger {
                event: TriggerEvent::ApplicationSubmitted,
                conditions: vec![Condition {
                    field: "department".to_string(),
                    operator: ConditionOperator::Equals,
                    value: json!("engineering"),
                }],
            },
            actions: vec![action(
                ActionKind::ScoreCandidate(ScoreConfig {
                    keywords: ["rust", "python", "sql", "docker", "kubernetes", "aws"]
                        .iter()
                        .map(|k| k.to_string())
                        .collect(),
                }),
                1,
            )],
        },
        WorkflowPreset {
            slug: "interview-reminder",
            name: "Interview reminder",
            description: "Remind the interviewer once an interview is on the calendar.",
            trigger: Trigger {
                event: TriggerEvent::InterviewScheduled,
                conditions: vec![],
            },
            actions: vec![
                action(
                    ActionKind::UpdateStatus(StatusConfig {
                        status: "interviewing".to_string(),
                    }),
                    1,
                ),
                action(
                    ActionKind::SendNotification(NotificationConfig {
                        recipient: Some("{{payload.interviewer}}".to_string()),
                        message: "Interview with {{payload.name}} scheduled for {{payload.scheduledAt}}."
                            .to_string(),
                    }),
                    2,
                ),
            ],
        },
        WorkflowPreset {
            slug: "offer-accepted-handoff",
            name: "Offer accepted handoff",
            description: "Mark the candidate hired and tell the team.",
            trigger: Trigger {
                event: TriggerEvent::OfferAccepted,
                conditions: vec![],
            },
            actions: vec![
                action(
                    ActionKind::UpdateStatus(StatusConfig {
                        status: "hired".to_string(),
                    }),
                    1,
                ),
                action(
                    ActionKind::RemoveTag(TagConfig {
                        tag: "to-screen".to_string(),
                    }),
                    2,
                ),
                action(
                    ActionKind::SendSlack(SlackConfig {
                        channel: Some("#people-ops".to_string()),
                        message: "{{payload.name}} accepted the offer. Start onboarding!"
                            .to_string(),
                    }),
                    3,
                ),
            ],
        },
    ]
}

fn action(kind: ActionKind, order: i32) -> WorkflowAction {
    WorkflowAction::new(kind, order)
}

fn tag(name: &str) -> ActionKind {
    ActionKind::AddTag(TagConfig {
        tag: name.to_string(),
    })
}
