use std::sync::Arc;

use crate::models::{ActionKind, ActionOutcome, TargetType};
use crate::notify::{Channel, Message, Notifier};
use crate::scoring::CandidateScorer;
use crate::store::EntityMutator;

use super::template;
use super::RunContext;

/// Runs a single action against its target. Collaborator failures come back
/// as a failed [`ActionOutcome`]; `execute` itself never errors.
pub struct ActionExecutor {
    mutator: Arc<dyn EntityMutator>,
    notifier: Arc<dyn Notifier>,
    scorer: Arc<dyn CandidateScorer>,
}

impl ActionExecutor {
    pub fn new(
        mutator: Arc<dyn EntityMutator>,
        notifier: Arc<dyn Notifier>,
        scorer: Arc<dyn CandidateScorer>,
    ) -> Self {
        Self {
            mutator,
            notifier,
            scorer,
        }
    }

    pub async fn execute(&self, kind: &ActionKind, ctx: &RunContext) -> ActionOutcome {
        let action_type = kind.type_name();
        match self.apply(kind, ctx).await {
            Ok(()) => ActionOutcome::succeeded(action_type),
            Err(e) => {
                tracing::warn!(
                    workflow = %ctx.workflow_name,
                    target = %ctx.target.target_id,
                    "Action {action_type} failed: {e}"
                );
                ActionOutcome::failed(action_type, e)
            }
        }
    }

    async fn apply(&self, kind: &ActionKind, ctx: &RunContext) -> Result<(), String> {
        let target = &ctx.target;

        match kind {
            ActionKind::UpdateStatus(config) => match &target.target_type {
                TargetType::Candidate | TargetType::Application => self
                    .mutator
                    .set_status(&target.target_type, target.target_id, &config.status)
                    .await
                    .map_err(|e| e.to_string()),
                other => {
                    // Other target kinds have no status field; the action
                    // reports success without touching anything.
                    tracing::warn!("update_status on {other} target {} has no effect", target.target_id);
                    Ok(())
                }
            },
            ActionKind::AddTag(config) => self
                .mutator
                .add_tag(target.target_id, &config.tag)
                .await
                .map_err(|e| e.to_string()),
            ActionKind::RemoveTag(config) => self
                .mutator
                .remove_tag(target.target_id, &config.tag)
                .await
                .map_err(|e| e.to_string()),
            ActionKind::SendNotification(config) => {
                let message = Message {
                    recipient: config.recipient.as_deref().map(|r| template::render(r, ctx)),
                    subject: None,
                    body: template::render(&config.message, ctx),
                };
                self.notify(Channel::InApp, &message).await
            }
            ActionKind::SendEmail(config) => {
                let message = Message {
                    recipient: Some(template::render(&config.to, ctx)),
                    subject: Some(template::render(&config.subject, ctx)),
                    body: template::render(&config.body, ctx),
                };
                self.notify(Channel::Email, &message).await
            }
            ActionKind::SendSlack(config) => {
                let message = Message {
                    recipient: config.channel.clone(),
                    subject: None,
                    body: template::render(&config.message, ctx),
                };
                self.notify(Channel::Slack, &message).await
            }
            ActionKind::Delay(config) => {
                // TODO: hand the remaining actions to a scheduler instead of running them now.
                tracing::debug!(
                    "Delay of {}s requested by workflow {}; continuing immediately",
                    config.duration_secs,
                    ctx.workflow_name
                );
                Ok(())
            }
            ActionKind::ScoreCandidate(config) => self
                .scorer
                .score(target.target_id, config)
                .await
                .map(|_| ()),
            ActionKind::Unsupported { action_type, .. } => {
                Err(format!("Unknown action type: {action_type}"))
            }
        }
    }

    async fn notify(&self, channel: Channel, message: &Message) -> Result<(), String> {
        let delivery = self.notifier.send(channel, message).await;
        if delivery.success {
            Ok(())
        } else {
            Err(delivery
                .error
                .unwrap_or_else(|| "Notification failed".to_string()))
        }
    }
}
